//! Per-object dispatch settings.

/// Settings applied to an exposed object's method table.
///
/// ```ignore
/// let animator = Hybrid::with_config(
///     Animator::default(),
///     DispatchConfig::new().with_catch_panics(false),
/// )?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Turn panics in native methods into `NativeFailure` errors instead of
    /// unwinding into the caller.
    pub catch_panics: bool,
    /// Answer `toString` with `"[HybridObject <Name>]"` unless the object
    /// registers its own.
    pub builtin_to_string: bool,
}

impl DispatchConfig {
    pub const fn new() -> Self {
        Self {
            catch_panics: true,
            builtin_to_string: true,
        }
    }

    pub const fn with_catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }

    pub const fn with_builtin_to_string(mut self, builtin_to_string: bool) -> Self {
        self.builtin_to_string = builtin_to_string;
        self
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::new()
    }
}
