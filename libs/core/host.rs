/// The window an activity is displayed in.
pub trait WindowHost: Send + Sync {
    /// Numeric handle of the window, `None` until the window is realized.
    fn xid(&self) -> Option<u32>;

    /// Bring the window to the front.
    fn present(&self);
}

/// Commands an activity variant knows how to run on behalf of the shell.
pub trait CommandExecutor: Send + Sync {
    /// Returns `true` when the command was handled.
    fn execute(&self, command: &str, args: &[String]) -> bool;
}

/// A registered inter-process endpoint.
pub trait BusEndpoint: Send + Sync {
    fn name(&self) -> &str;

    fn path(&self) -> &str;

    /// Unregister the endpoint. Consumes it so it can only happen once.
    fn release(self: Box<Self>);
}
