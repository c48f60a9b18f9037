use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

// ============================================================================
// Simulated Network Latency
// ============================================================================
//
// Every store operation waits for one latency sample before it touches the
// collection. The wait is the only suspension point of an operation.
//
// Profiles:
// - None:    tests, yields once to the scheduler and returns
// - Fixed:   deterministic delay
// - Uniform: random delay in [min, max), the default "network" feel
//
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Latency {
    None,
    Fixed(Duration),
    Uniform { min: Duration, max: Duration },
}

impl Default for Latency {
    fn default() -> Self {
        Self::network()
    }
}

impl Latency {
    /// 200-500 ms, the default profile
    pub fn network() -> Self {
        Self::Uniform {
            min: Duration::from_millis(200),
            max: Duration::from_millis(500),
        }
    }

    /// Build a profile from millisecond bounds. `0..0` disables latency.
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        match (min_ms, max_ms) {
            (0, 0) => Self::None,
            (min, max) if min >= max => Self::Fixed(Duration::from_millis(min)),
            (min, max) => Self::Uniform {
                min: Duration::from_millis(min),
                max: Duration::from_millis(max),
            },
        }
    }

    /// Draw one delay from the profile
    pub fn sample(&self) -> Duration {
        match self {
            Latency::None => Duration::ZERO,
            Latency::Fixed(delay) => *delay,
            Latency::Uniform { min, max } if min >= max => *min,
            Latency::Uniform { min, max } => rand::thread_rng().gen_range(*min..*max),
        }
    }

    pub async fn wait(&self) {
        let delay = self.sample();
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            sleep(delay).await;
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
