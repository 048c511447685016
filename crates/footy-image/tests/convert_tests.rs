use footy_image::{luma_to_rgb, planes_to_rgb, yuv_planes_to_rgb, yuv_to_rgb, FramePlanes, ImageError};

#[test]
fn test_all_zero_luma_is_black() {
    let y = vec![0u8; 4 * 2];
    let image = planes_to_rgb(&FramePlanes::new(&y, 4, 2)).unwrap();
    assert_eq!(image.width(), 4);
    assert_eq!(image.height(), 2);
    assert!(image.as_raw().iter().all(|&b| b == 0));
    assert!(image.to_argb_u32().iter().all(|&p| p == 0xFF00_0000));
}

#[test]
fn test_luma_only_is_gray_for_every_value() {
    let y: Vec<u8> = (0..=255).collect();
    let image = luma_to_rgb(&FramePlanes::new(&y, 16, 16)).unwrap();
    for row in 0..16 {
        for col in 0..16 {
            let luma = y[row * 16 + col];
            assert_eq!(image.pixel(col, row), [luma, luma, luma]);
        }
    }
}

#[test]
fn test_missing_one_chroma_plane_falls_back_to_gray() {
    let y = vec![77u8; 4];
    let u = vec![0u8; 1];
    let planes = FramePlanes::new(&y, 2, 2).with_optional_chroma(Some(&u), None);
    let image = planes_to_rgb(&planes).unwrap();
    assert_eq!(image.pixel(1, 1), [77, 77, 77]);
}

#[test]
fn test_luma_row_padding_is_skipped() {
    // two rows of 4 pixels with 2 padding bytes each
    let y = vec![10, 20, 30, 40, 255, 255, 50, 60, 70, 80, 255, 255];
    let planes = FramePlanes::new(&y, 4, 2).with_y_row_stride(6);
    let image = luma_to_rgb(&planes).unwrap();
    assert_eq!(image.pixel(3, 0), [40, 40, 40]);
    assert_eq!(image.pixel(0, 1), [50, 50, 50]);
    assert!(!image.as_raw().contains(&255));
}

#[test]
fn test_yuv_to_rgb_reference_values() {
    assert_eq!(yuv_to_rgb(16, 128, 128), [0, 0, 0]);
    assert_eq!(yuv_to_rgb(128, 128, 128), [130, 130, 130]);
    assert_eq!(yuv_to_rgb(235, 128, 128), [254, 254, 254]);
    assert_eq!(yuv_to_rgb(255, 128, 128), [255, 255, 255]);
    assert_eq!(yuv_to_rgb(81, 90, 240), [254, 0, 0]);
}

#[test]
fn test_chroma_pixel_stride_selects_samples() {
    let y = vec![128u8; 4 * 2];
    // interleaved layout: samples at even offsets, junk in between
    let u = vec![128, 0, 90, 0];
    let v = vec![128, 0, 240, 0];
    let planes = FramePlanes::new(&y, 4, 2)
        .with_chroma(&u, &v)
        .with_uv_row_stride(4)
        .with_uv_pixel_stride(2);
    let image = planes_to_rgb(&planes).unwrap();
    assert_eq!(image.pixel(0, 0), [130, 130, 130]);
    assert_eq!(image.pixel(1, 1), [130, 130, 130]);
    assert_eq!(image.pixel(2, 0), yuv_to_rgb(128, 90, 240));
    assert_eq!(image.pixel(3, 1), yuv_to_rgb(128, 90, 240));
}

#[test]
fn test_short_chroma_planes_are_clamped_not_overread() {
    // a 6x6 frame would need 9 chroma samples; give it one
    let y = vec![200u8; 36];
    let u = vec![60u8];
    let v = vec![190u8];
    let planes = FramePlanes::new(&y, 6, 6)
        .with_chroma(&u, &v)
        .with_uv_row_stride(3);
    let image = yuv_planes_to_rgb(&planes, &u, &v).unwrap();
    let expected = yuv_to_rgb(200, 60, 190);
    for row in 0..6 {
        for col in 0..6 {
            assert_eq!(image.pixel(col, row), expected);
        }
    }
}

#[test]
fn test_huge_strides_do_not_overflow() {
    let y = vec![16u8; 16];
    let u = vec![128u8, 10];
    let v = vec![128u8, 20];
    let planes = FramePlanes::new(&y, 4, 4)
        .with_chroma(&u, &v)
        .with_uv_row_stride(usize::MAX)
        .with_uv_pixel_stride(usize::MAX);
    let image = planes_to_rgb(&planes).unwrap();
    assert_eq!(image.pixel(0, 0), yuv_to_rgb(16, 128, 128));
    assert_eq!(image.pixel(1, 1), yuv_to_rgb(16, 128, 128));
    assert_eq!(image.pixel(3, 3), yuv_to_rgb(16, 10, 20));
}

#[test]
fn test_zero_dimensions_are_rejected() {
    let y = vec![0u8; 4];
    let result = planes_to_rgb(&FramePlanes::new(&y, 0, 2));
    assert!(matches!(result, Err(ImageError::InvalidDimensions { width: 0, height: 2 })));
}

#[test]
fn test_short_luma_plane_is_rejected() {
    let y = vec![0u8; 7];
    let result = planes_to_rgb(&FramePlanes::new(&y, 4, 2));
    assert_eq!(
        result.unwrap_err(),
        ImageError::PlaneTooShort {
            plane: "Y",
            needed: 8,
            got: 7
        }
    );
}

#[test]
fn test_empty_chroma_plane_is_rejected() {
    let y = vec![0u8; 4];
    let u: Vec<u8> = Vec::new();
    let v = vec![128u8];
    let planes = FramePlanes::new(&y, 2, 2).with_chroma(&u, &v);
    assert!(matches!(
        planes_to_rgb(&planes),
        Err(ImageError::PlaneTooShort { plane: "U", .. })
    ));
}

#[test]
fn test_luma_stride_smaller_than_width_is_rejected() {
    let y = vec![0u8; 16];
    let planes = FramePlanes::new(&y, 4, 2).with_y_row_stride(3);
    assert!(matches!(planes_to_rgb(&planes), Err(ImageError::InvalidStride(_))));
}
