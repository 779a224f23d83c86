//! Screen capture via GDI.
//!
//! Copies a rectangle of the virtual screen into a top-down BGRA
//! buffer. Parts of the rectangle outside every monitor come back
//! black.

/// Force every pixel opaque; GDI leaves the alpha byte undefined.
pub fn make_opaque(bgra: &mut [u8]) {
    for px in bgra.chunks_exact_mut(4) {
        px[3] = 0xFF;
    }
}

#[cfg(target_os = "windows")]
mod platform {
    use tracing::trace;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Gdi::*;

    use eco_core::{EcoError, Frame, PixelFormat, Rect, ScreenCapturer};

    use super::make_opaque;

    /// Captures screen regions with `BitBlt`.
    #[derive(Debug, Default)]
    pub struct GdiCapturer;

    impl GdiCapturer {
        pub fn new() -> Self {
            Self
        }
    }

    impl ScreenCapturer for GdiCapturer {
        fn capture(&mut self, region: Rect) -> Result<Frame, EcoError> {
            if region.is_empty() {
                return Err(EcoError::Capture(format!("empty region {region}")));
            }
            let (width, height) = (region.width as i32, region.height as i32);
            let format = PixelFormat::Bgra8;
            let mut data =
                vec![0u8; region.width as usize * region.height as usize * format.bytes_per_pixel()];

            unsafe {
                let hdc_screen = GetDC(HWND::default());
                if hdc_screen.is_invalid() {
                    return Err(EcoError::Capture("GetDC failed".into()));
                }
                let hdc_mem = CreateCompatibleDC(hdc_screen);
                let hbitmap = CreateCompatibleBitmap(hdc_screen, width, height);

                let result = if hdc_mem.is_invalid() || hbitmap.is_invalid() {
                    Err(EcoError::Capture("cannot allocate capture bitmap".into()))
                } else {
                    let old = SelectObject(hdc_mem, hbitmap);

                    let copied = BitBlt(
                        hdc_mem,
                        0,
                        0,
                        width,
                        height,
                        hdc_screen,
                        region.x,
                        region.y,
                        ROP_CODE(SRCCOPY.0 | CAPTUREBLT.0),
                    );

                    let mut bmi = BITMAPINFO {
                        bmiHeader: BITMAPINFOHEADER {
                            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                            biWidth: width,
                            // Negative height = top-down DIB (origin at top-left).
                            biHeight: -height,
                            biPlanes: 1,
                            biBitCount: 32,
                            biCompression: BI_RGB.0,
                            ..Default::default()
                        },
                        ..Default::default()
                    };

                    // The bitmap must not be selected into a DC for GetDIBits.
                    SelectObject(hdc_mem, old);

                    match copied {
                        Err(e) => Err(EcoError::Capture(format!("BitBlt {region}: {e}"))),
                        Ok(()) => {
                            let lines = GetDIBits(
                                hdc_mem,
                                hbitmap,
                                0,
                                height as u32,
                                Some(data.as_mut_ptr() as *mut _),
                                &mut bmi,
                                DIB_RGB_COLORS,
                            );
                            if lines == height {
                                Ok(())
                            } else {
                                Err(EcoError::Capture(format!(
                                    "GetDIBits returned {lines} of {height} lines"
                                )))
                            }
                        }
                    }
                };

                if !hbitmap.is_invalid() {
                    let _ = DeleteObject(hbitmap);
                }
                if !hdc_mem.is_invalid() {
                    let _ = DeleteDC(hdc_mem);
                }
                ReleaseDC(HWND::default(), hdc_screen);

                result?;
            }

            make_opaque(&mut data);
            trace!(%region, "captured");

            Frame::from_raw(region.width, region.height, format, data)
                .ok_or_else(|| EcoError::Capture("capture buffer size mismatch".into()))
        }
    }
}

#[cfg(target_os = "windows")]
pub use platform::*;

// ── Non-Windows stub ─────────────────────────────────────────────

#[cfg(not(target_os = "windows"))]
pub mod stub {
    use eco_core::{EcoError, Frame, Rect, ScreenCapturer};

    #[derive(Debug, Default)]
    pub struct GdiCapturer;

    impl GdiCapturer {
        pub fn new() -> Self {
            Self
        }
    }

    impl ScreenCapturer for GdiCapturer {
        fn capture(&mut self, _region: Rect) -> Result<Frame, EcoError> {
            Err(EcoError::Capture(
                "Screen capture is only supported on Windows".into(),
            ))
        }
    }
}

#[cfg(not(target_os = "windows"))]
pub use stub::*;

// ── Tests ────────────────────────────────────────────────────────
