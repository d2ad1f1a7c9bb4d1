//! Host lifecycle signals consumed by the background process.

/// Why the extension's `Installed` signal fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallReason {
    Install,
    Update,
}

/// A lifecycle signal from the hosting browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The whole browser started. Fires once, before any window exists,
    /// and never fires when the background process is merely woken from
    /// idle — the distinction the recovery ordering depends on.
    Startup,
    /// The extension was installed or updated. There is no prior staged
    /// state to recover on this path.
    Installed(InstallReason),
    /// A window closed, carrying its id. Fires while this process is
    /// still guaranteed to be running.
    WindowClosed(u64),
}
