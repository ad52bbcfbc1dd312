// SimZilla desktop UI (wry + tao)

pub mod webview_app;
pub mod webview_surface;
