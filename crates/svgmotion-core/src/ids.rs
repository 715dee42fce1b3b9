//! Id generation for layers, keyframes and groups.
//!
//! Generated ids follow the `<prefix>-<millis>-<suffix>` shape found in
//! authored documents. The source is a trait so deterministic scenarios
//! (tests, fixtures) can inject a monotonic counter instead of the clock.

pub trait IdSource {
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Wall-clock timestamp plus a random suffix. Collisions are treated as
/// negligible, not algebraically impossible.
///
/// Relies on the system clock and RNG; on `wasm32-unknown-unknown` hosts the
/// adapter crate supplies its own [`IdSource`] backed by the JS clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockIdSource;

impl IdSource for ClockIdSource {
    fn next_id(&mut self, prefix: &str) -> String {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let hex = uuid::Uuid::new_v4().simple().to_string();
        format!("{prefix}-{millis}-{}", &hex[..7])
    }
}

/// Monotonic source for reproducible ids.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialIdSource {
    next: u32,
}

impl SequentialIdSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
