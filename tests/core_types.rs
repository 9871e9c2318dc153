use iconseek::{IconSeekError, ImageView, OwnedImage};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        IconSeekError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        IconSeekError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        IconSeekError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 3];

    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, IconSeekError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn image_view_reads_rows_and_pixels() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();
    assert_eq!(view.stride(), 4);
    assert_eq!(view.as_slice(), data.as_slice());
    assert_eq!(view.row(1).unwrap(), &[4u8, 5u8, 6u8, 7u8]);
    assert_eq!(view.get(2, 3).copied(), Some(14u8));
    assert!(view.get(4, 0).is_none());
    assert!(view.row(4).is_none());
}

#[test]
fn strided_view_skips_row_padding() {
    // 3x2 image stored with stride 4: one padding byte per row.
    let data = [1u8, 2, 3, 99, 4, 5, 6, 99];
    let view = ImageView::new(&data, 3, 2, 4).unwrap();
    assert_eq!(view.row(0).unwrap(), &[1u8, 2, 3]);
    assert_eq!(view.row(1).unwrap(), &[4u8, 5, 6]);
}

#[test]
fn owned_image_rejects_mismatched_buffer() {
    assert!(OwnedImage::new(vec![0u8; 5], 2, 2).is_err());
    assert!(OwnedImage::new(vec![0u8; 3], 2, 2).is_err());

    let img = OwnedImage::new(vec![7u8; 6], 3, 2).unwrap();
    assert_eq!(img.width(), 3);
    assert_eq!(img.height(), 2);
    assert_eq!(img.view().row(1).unwrap(), &[7u8, 7, 7]);
}
