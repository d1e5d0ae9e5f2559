//! Stack safety for recursive parsing.

/// Minimum stack space to keep available before recursing.
const RED_ZONE: usize = 100 * 1024; // 100KB
/// Stack space to allocate when growing.
const STACK_PER_RECURSION: usize = 1024 * 1024; // 1MB

/// Nesting depth at which the parser stops descending and reports
/// `ERR_InsufficientStack` instead.
pub(crate) const MAX_NESTING_DEPTH: u32 = 2_000;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
