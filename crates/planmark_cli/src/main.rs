//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `planmark_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("planmark_core ping={}", planmark_core::ping());
    println!("planmark_core version={}", planmark_core::core_version());
}
