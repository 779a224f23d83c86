//! Display renderer: blits mirrored frames into the window.
//!
//! Uses GDI `StretchDIBits` at 1:1, anchored at the client origin.
//! Scaling already happened in the core, so the frame is never
//! stretched here.

use std::borrow::Cow;

use eco_core::{Frame, PixelFormat};

/// Frame bytes in the BGRA order GDI expects.
pub fn bgra_bytes(frame: &Frame) -> Cow<'_, [u8]> {
    match frame.format {
        PixelFormat::Bgra8 => Cow::Borrowed(frame.as_bytes()),
        PixelFormat::Rgba8 => {
            let mut data = frame.as_bytes().to_vec();
            for px in data.chunks_exact_mut(4) {
                px.swap(0, 2);
            }
            Cow::Owned(data)
        }
    }
}

#[cfg(target_os = "windows")]
mod platform {
    use windows::Win32::Foundation::*;
    use windows::Win32::Graphics::Gdi::*;

    use eco_core::{EcoError, Frame};

    use super::bgra_bytes;

    /// Draws frames into an HWND's client area.
    pub struct DisplayRenderer {
        hwnd: HWND,
    }

    impl DisplayRenderer {
        /// Create a renderer targeting the given window.
        pub fn new(hwnd: HWND) -> Self {
            Self { hwnd }
        }

        /// Draw `frame` unscaled with its top-left at the client origin.
        pub fn render(&self, frame: &Frame) -> Result<(), EcoError> {
            let (width, height) = (frame.width(), frame.height());
            if width == 0 || height == 0 {
                return Ok(());
            }
            let data = bgra_bytes(frame);

            let bmi = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: width as i32,
                    // Negative height = top-down DIB (origin at top-left).
                    biHeight: -(height as i32),
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                bmiColors: [RGBQUAD::default(); 1],
            };

            unsafe {
                let hdc = GetDC(self.hwnd);
                if hdc.is_invalid() {
                    return Err(EcoError::Render("GetDC failed".into()));
                }

                let lines = StretchDIBits(
                    hdc,
                    0,
                    0,
                    width as i32,
                    height as i32,
                    0,
                    0,
                    width as i32,
                    height as i32,
                    Some(data.as_ptr() as *const _),
                    &bmi,
                    DIB_RGB_COLORS,
                    SRCCOPY,
                );

                ReleaseDC(self.hwnd, hdc);

                if lines == 0 {
                    return Err(EcoError::Render("StretchDIBits copied no lines".into()));
                }
            }

            Ok(())
        }
    }
}

#[cfg(target_os = "windows")]
pub use platform::*;

// ── Tests ────────────────────────────────────────────────────────
