//! Win32 window creation and message loop.
//!
//! One top-level window serves as both the source selector and the
//! destination mirror. The window produces [`WindowEvent`]s that the
//! main loop turns into commands and paints, and implements
//! [`MirrorWindow`] so the core can move, retitle and draw into it.

use eco_core::Rect;

use crate::input::Modifiers;

/// Events produced by the window message loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// Window close requested (Alt-F4/X button).
    Close,
    /// The platform wants the client area redrawn.
    Paint,
    /// Client area resized.
    Resize(u32, u32),
    /// Window moved (client origin in screen coordinates).
    Moved(i32, i32),
    /// Key down/up.
    Key {
        virtual_key: u16,
        modifiers: Modifiers,
        pressed: bool,
    },
}

/// Window creation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOptions {
    /// Keep the window above all others.
    pub always_on_top: bool,
    /// Title bar and system menu; otherwise only a resize border.
    pub decorated: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            always_on_top: true,
            decorated: true,
        }
    }
}

/// Screen width used when the platform cannot report one.
pub const FALLBACK_SCREEN_WIDTH: u32 = 1920;

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn rect_from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Rect {
    Rect::new(
        left,
        top,
        (right - left).max(1) as u32,
        (bottom - top).max(1) as u32,
    )
}

#[cfg(target_os = "windows")]
mod platform {
    use std::sync::mpsc;

    use tracing::warn;
    use windows::Win32::Foundation::*;
    use windows::Win32::Graphics::Gdi::{
        BeginPaint, COLOR_BTNFACE, EndPaint, GetSysColorBrush, InvalidateRect, PAINTSTRUCT,
    };
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        GetKeyState, VIRTUAL_KEY, VK_CONTROL, VK_MENU, VK_SHIFT,
    };
    use windows::Win32::UI::WindowsAndMessaging::*;
    use windows::core::PCWSTR;

    use eco_core::{EcoError, Frame, MirrorWindow, Rect};

    use super::{WindowEvent, WindowOptions, rect_from_edges};
    use crate::display::DisplayRenderer;
    use crate::input::Modifiers;

    /// Handle to the native window.
    pub struct NativeWindow {
        hwnd: HWND,
        options: WindowOptions,
        renderer: DisplayRenderer,
        /// Bounds last applied, reported if the OS query fails.
        last_bounds: Rect,
        event_rx: mpsc::Receiver<WindowEvent>,
    }

    fn held_modifiers() -> Modifiers {
        let down = |key: VIRTUAL_KEY| unsafe { GetKeyState(key.0 as i32) } < 0;
        let mut modifiers = Modifiers::empty();
        if down(VK_CONTROL) {
            modifiers |= Modifiers::CTRL;
        }
        if down(VK_SHIFT) {
            modifiers |= Modifiers::SHIFT;
        }
        if down(VK_MENU) {
            modifiers |= Modifiers::ALT;
        }
        modifiers
    }

    fn key_event(wparam: WPARAM, pressed: bool) -> WindowEvent {
        WindowEvent::Key {
            virtual_key: (wparam.0 & 0xFFFF) as u16,
            modifiers: held_modifiers(),
            pressed,
        }
    }

    // We store a raw pointer to the mpsc sender in GWLP_USERDATA.
    // This is safe because the pointer lives as long as the window.
    unsafe extern "system" fn wndproc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        let tx_ptr = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *const mpsc::Sender<WindowEvent>;

        if tx_ptr.is_null() {
            return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
        }

        let tx = unsafe { &*tx_ptr };

        match msg {
            WM_CLOSE => {
                let _ = tx.send(WindowEvent::Close);
                LRESULT(0)
            }
            WM_PAINT => {
                // Validate (and erase, if flagged) now; the mirror draws
                // through its own DC once the event is processed.
                let mut ps = PAINTSTRUCT::default();
                unsafe {
                    BeginPaint(hwnd, &mut ps);
                    let _ = EndPaint(hwnd, &ps);
                }
                let _ = tx.send(WindowEvent::Paint);
                LRESULT(0)
            }
            WM_SIZE => {
                let w = (lparam.0 & 0xFFFF) as u32;
                let h = ((lparam.0 >> 16) & 0xFFFF) as u32;
                let _ = tx.send(WindowEvent::Resize(w, h));
                LRESULT(0)
            }
            WM_MOVE => {
                let x = (lparam.0 & 0xFFFF) as i16 as i32;
                let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
                let _ = tx.send(WindowEvent::Moved(x, y));
                LRESULT(0)
            }
            WM_KEYDOWN => {
                let _ = tx.send(key_event(wparam, true));
                LRESULT(0)
            }
            WM_KEYUP => {
                let _ = tx.send(key_event(wparam, false));
                LRESULT(0)
            }
            WM_SYSKEYDOWN | WM_SYSKEYUP => {
                // Still forwarded to DefWindowProc so Alt-F4 keeps working.
                let _ = tx.send(key_event(wparam, msg == WM_SYSKEYDOWN));
                unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
            }
            WM_DESTROY => {
                unsafe { PostQuitMessage(0) };
                LRESULT(0)
            }
            _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
        }
    }

    impl NativeWindow {
        /// Create the mirror window at `bounds`.
        pub fn create(title: &str, bounds: Rect, options: WindowOptions) -> Result<Self, EcoError> {
            let (event_tx, event_rx) = mpsc::channel();

            let hinstance = unsafe { GetModuleHandleW(None) }
                .map_err(|e| EcoError::Window(format!("GetModuleHandle: {e}")))?;

            let class_name_wide: Vec<u16> = "EcoMirrorClass\0".encode_utf16().collect();

            let wc = WNDCLASSW {
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(wndproc),
                hInstance: hinstance.into(),
                lpszClassName: PCWSTR(class_name_wide.as_ptr()),
                hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
                hbrBackground: unsafe { GetSysColorBrush(COLOR_BTNFACE) },
                ..Default::default()
            };

            let atom = unsafe { RegisterClassW(&wc) };
            if atom == 0 {
                return Err(EcoError::Window("RegisterClassW failed".into()));
            }

            let title_wide: Vec<u16> = title.encode_utf16().chain(std::iter::once(0)).collect();

            let ex_style = if options.always_on_top {
                WS_EX_TOPMOST
            } else {
                WINDOW_EX_STYLE(0)
            };
            let style = if options.decorated {
                WS_OVERLAPPEDWINDOW
            } else {
                WS_POPUP | WS_THICKFRAME
            };

            let hwnd = unsafe {
                CreateWindowExW(
                    ex_style,
                    PCWSTR(class_name_wide.as_ptr()),
                    PCWSTR(title_wide.as_ptr()),
                    style | WS_VISIBLE,
                    bounds.x,
                    bounds.y,
                    bounds.width as i32,
                    bounds.height as i32,
                    None,
                    None,
                    hinstance,
                    None,
                )
            }
            .map_err(|e| EcoError::Window(format!("CreateWindowExW failed: {e}")))?;

            if hwnd.is_invalid() {
                return Err(EcoError::Window("CreateWindowExW returned invalid HWND".into()));
            }

            // Store the event sender pointer in GWLP_USERDATA.
            let tx_ptr = Box::into_raw(Box::new(event_tx));
            unsafe {
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, tx_ptr as isize);
            }

            Ok(Self {
                hwnd,
                options,
                renderer: DisplayRenderer::new(hwnd),
                last_bounds: bounds,
                event_rx,
            })
        }

        /// Pump windows messages (non-blocking). Returns collected events.
        ///
        /// While the user drags or resizes the window, the system's modal
        /// move/size loop runs inside `DispatchMessageW`, so this call does
        /// not return until the mouse is released.
        pub fn poll_events(&self) -> Vec<WindowEvent> {
            unsafe {
                let mut msg = MSG::default();
                while PeekMessageW(&mut msg, self.hwnd, 0, 0, PM_REMOVE).as_bool() {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
            }
            self.event_rx.try_iter().collect()
        }
    }

    impl MirrorWindow for NativeWindow {
        fn bounds(&self) -> Rect {
            let mut rect = RECT::default();
            match unsafe { GetWindowRect(self.hwnd, &mut rect) } {
                Ok(()) => rect_from_edges(rect.left, rect.top, rect.right, rect.bottom),
                Err(e) => {
                    warn!("GetWindowRect failed: {e}");
                    self.last_bounds
                }
            }
        }

        fn set_bounds(&mut self, rect: Rect) {
            let (insert_after, flags) = if self.options.always_on_top {
                (HWND_TOPMOST, SWP_NOACTIVATE)
            } else {
                (HWND::default(), SWP_NOACTIVATE | SWP_NOZORDER)
            };
            let result = unsafe {
                SetWindowPos(
                    self.hwnd,
                    insert_after,
                    rect.x,
                    rect.y,
                    rect.width as i32,
                    rect.height as i32,
                    flags,
                )
            };
            if let Err(e) = result {
                warn!(%rect, "SetWindowPos failed: {e}");
            }
            self.last_bounds = rect;
        }

        fn set_title(&mut self, title: &str) {
            let wide: Vec<u16> = title.encode_utf16().chain(std::iter::once(0)).collect();
            if let Err(e) = unsafe { SetWindowTextW(self.hwnd, PCWSTR(wide.as_ptr())) } {
                warn!("SetWindowTextW failed: {e}");
            }
        }

        fn request_repaint(&mut self) {
            unsafe {
                let _ = InvalidateRect(self.hwnd, None, BOOL(0));
            }
        }

        fn draw(&mut self, frame: &Frame) -> Result<(), EcoError> {
            self.renderer.render(frame)
        }
    }

    impl Drop for NativeWindow {
        fn drop(&mut self) {
            unsafe {
                // Recover and drop the boxed sender.
                let ptr = GetWindowLongPtrW(self.hwnd, GWLP_USERDATA)
                    as *mut mpsc::Sender<WindowEvent>;
                if !ptr.is_null() {
                    drop(Box::from_raw(ptr));
                    SetWindowLongPtrW(self.hwnd, GWLP_USERDATA, 0);
                }
                let _ = DestroyWindow(self.hwnd);
            }
        }
    }

    /// Width of the primary screen in pixels.
    pub fn screen_width() -> u32 {
        let width = unsafe { GetSystemMetrics(SM_CXSCREEN) };
        if width > 0 {
            width as u32
        } else {
            super::FALLBACK_SCREEN_WIDTH
        }
    }
}

#[cfg(target_os = "windows")]
pub use platform::*;

// ── Non-Windows stub ─────────────────────────────────────────────

#[cfg(not(target_os = "windows"))]
pub mod stub {
    use eco_core::{EcoError, Frame, MirrorWindow, Rect};

    use super::{WindowEvent, WindowOptions};

    pub struct NativeWindow;

    impl NativeWindow {
        pub fn create(_title: &str, _bounds: Rect, _options: WindowOptions) -> Result<Self, EcoError> {
            Err(EcoError::Window(
                "Window creation is only supported on Windows".into(),
            ))
        }

        pub fn poll_events(&self) -> Vec<WindowEvent> {
            Vec::new()
        }
    }

    impl MirrorWindow for NativeWindow {
        fn bounds(&self) -> Rect {
            Rect::default()
        }

        fn set_bounds(&mut self, _rect: Rect) {}

        fn set_title(&mut self, _title: &str) {}

        fn request_repaint(&mut self) {}

        fn draw(&mut self, _frame: &Frame) -> Result<(), EcoError> {
            Err(EcoError::Render(
                "Display rendering is only supported on Windows".into(),
            ))
        }
    }

    pub fn screen_width() -> u32 {
        super::FALLBACK_SCREEN_WIDTH
    }
}

#[cfg(not(target_os = "windows"))]
pub use stub::*;

// ── Tests ────────────────────────────────────────────────────────
