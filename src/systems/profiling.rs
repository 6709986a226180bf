//! Per-system timings over a sliding window of logic ticks.

use std::fmt::Display;
use std::time::{Duration, Instant};

use bevy_ecs::resource::Resource;
use bevy_ecs::system::{IntoSystem, System};
use bevy_ecs::world::World;
use circular_buffer::CircularBuffer;
use num_width::NumberWidth;
use parking_lot::Mutex;
use smallvec::SmallVec;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};
use thousands::Separable;

use crate::systems::components::SimClock;

pub const MAX_SYSTEMS: usize = SystemId::COUNT;
/// Number of ticks a buffer remembers.
const TIMING_WINDOW_SIZE: usize = 30;
/// A single system above this on the last tick is always reported as slow.
const SLOW_SYSTEM_THRESHOLD: Duration = Duration::from_millis(2);

#[derive(EnumCount, EnumIter, IntoStaticStr, Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum SystemId {
    Total,
    ModeExpiry,
    Ghost,
    Player,
    Collision,
    EndOfTick,
    ModeSync,
    Animation,
}

impl Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Into::<&'static str>::into(self).to_ascii_lowercase())
    }
}

/// Durations for one system, one slot per tick. Ticks the system did not run in
/// (a render-only frame, a skipped tick) are filled with zero.
#[derive(Debug, Default)]
pub struct TimingBuffer {
    buffer: CircularBuffer<TIMING_WINDOW_SIZE, Duration>,
    last_tick: Option<u64>,
}

impl TimingBuffer {
    fn fill_gap(&mut self, tick: u64) {
        if let Some(last) = self.last_tick {
            for _ in 0..tick.saturating_sub(last).saturating_sub(1).min(TIMING_WINDOW_SIZE as u64) {
                self.buffer.push_back(Duration::ZERO);
            }
        }
    }

    /// Records a duration for `tick`. Several recordings in the same tick accumulate.
    pub fn record(&mut self, duration: Duration, tick: u64) {
        match self.last_tick {
            Some(last) if last == tick => {
                if let Some(slot) = self.buffer.back_mut() {
                    *slot += duration;
                    return;
                }
            }
            // A restarted session counts from zero again.
            Some(last) if tick < last => self.buffer.clear(),
            _ => self.fill_gap(tick),
        }

        self.buffer.push_back(duration);
        self.last_tick = Some(tick);
    }

    pub fn most_recent(&self) -> Duration {
        self.buffer.back().copied().unwrap_or(Duration::ZERO)
    }

    /// Mean and sample standard deviation over the window (Welford's algorithm).
    pub fn stats(&self) -> (Duration, Duration) {
        let mut count = 0u32;
        let mut mean = 0.0f64;
        let mut sum_squared_diff = 0.0f64;

        for duration in self.buffer.iter() {
            let secs = duration.as_secs_f64();
            count += 1;
            let diff = secs - mean;
            mean += diff / count as f64;
            sum_squared_diff += diff * (secs - mean);
        }

        if count == 0 {
            return (Duration::ZERO, Duration::ZERO);
        }
        let variance = if count > 1 {
            sum_squared_diff / (count - 1) as f64
        } else {
            0.0
        };
        (Duration::from_secs_f64(mean), Duration::from_secs_f64(variance.sqrt()))
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[derive(Resource, Debug)]
pub struct SystemTimings {
    timings: micromap::Map<SystemId, Mutex<TimingBuffer>, MAX_SYSTEMS>,
}

impl Default for SystemTimings {
    fn default() -> Self {
        let mut timings = micromap::Map::new();
        for id in SystemId::iter() {
            timings.insert(id, Mutex::new(TimingBuffer::default()));
        }
        Self { timings }
    }
}

impl SystemTimings {
    pub fn add_timing(&self, id: SystemId, duration: Duration, tick: u64) {
        if let Some(buffer) = self.timings.get(&id) {
            buffer.lock().record(duration, tick);
        }
    }

    pub fn most_recent(&self, id: SystemId) -> Duration {
        self.timings
            .get(&id)
            .map(|buffer| buffer.lock().most_recent())
            .unwrap_or(Duration::ZERO)
    }

    pub fn stats(&self, id: SystemId) -> (Duration, Duration) {
        self.timings
            .get(&id)
            .map(|buffer| buffer.lock().stats())
            .unwrap_or((Duration::ZERO, Duration::ZERO))
    }

    /// The systems most likely responsible for a slow tick.
    ///
    /// Every system above 2 ms on the last tick, if any. Otherwise the most expensive
    /// systems until they make up 30% of the tick, at most five.
    pub fn slowest_systems(&self) -> SmallVec<[(SystemId, Duration); 5]> {
        let mut recent: SmallVec<[(SystemId, Duration); MAX_SYSTEMS]> = SystemId::iter()
            .filter(|id| *id != SystemId::Total)
            .map(|id| (id, self.most_recent(id)))
            .collect();
        recent.sort_by(|a, b| b.1.cmp(&a.1));

        let over: SmallVec<[(SystemId, Duration); 5]> = recent
            .iter()
            .filter(|(_, duration)| *duration >= SLOW_SYSTEM_THRESHOLD)
            .take(5)
            .copied()
            .collect();
        if !over.is_empty() {
            return over;
        }

        let total: Duration = recent.iter().map(|(_, duration)| *duration).sum();
        let threshold = total.as_nanos() as f64 * 0.3;
        let mut accumulated = 0u128;
        let mut result = SmallVec::new();
        for (id, duration) in recent.iter().take(5) {
            result.push((*id, *duration));
            accumulated += duration.as_nanos();
            if accumulated as f64 >= threshold {
                break;
            }
        }
        result
    }

    /// One aligned line per system, most expensive first, headed by the tick total
    /// and the tick rate it could sustain.
    pub fn format_timing_display(&self) -> SmallVec<[String; MAX_SYSTEMS]> {
        let (total_avg, total_std) = self.stats(SystemId::Total);
        let sustainable = match total_avg.as_secs_f64() {
            secs if secs <= 0.0 => "    - TPS".to_string(),
            secs => match 1.0 / secs {
                rate if rate > 100.0 => format!("{:>5} TPS", (rate as u64).separate_with_commas()),
                rate => format!("{rate:5.1} TPS"),
            },
        };

        let mut rows: SmallVec<[(String, Duration, Duration); MAX_SYSTEMS]> = SmallVec::new();
        rows.push((sustainable, total_avg, total_std));

        let mut systems: SmallVec<[(SystemId, (Duration, Duration)); MAX_SYSTEMS]> = SystemId::iter()
            .filter(|id| *id != SystemId::Total)
            .map(|id| (id, self.stats(id)))
            .collect();
        systems.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));
        rows.extend(systems.into_iter().map(|(id, (avg, std))| (id.to_string(), avg, std)));

        format_timing_rows(rows)
    }
}

/// Wraps a system so each run's duration is recorded under `id`, keyed by the
/// simulated tick it ran in.
pub fn profile<S, M>(id: SystemId, system: S) -> impl FnMut(&mut World)
where
    S: IntoSystem<(), (), M> + 'static,
{
    let mut system: S::System = IntoSystem::into_system(system);
    let mut is_initialized = false;
    move |world: &mut World| {
        if !is_initialized {
            system.initialize(world);
            is_initialized = true;
        }

        let start = Instant::now();
        system.run((), world);
        let duration = start.elapsed();

        if let (Some(timings), Some(clock)) = (world.get_resource::<SystemTimings>(), world.get_resource::<SimClock>()) {
            timings.add_timing(id, duration, clock.ticks);
        }
    }
}

/// Splits a duration into whole units, three decimals and a unit suffix.
fn split_duration(duration: Duration) -> (u64, u32, &'static str) {
    if duration >= Duration::from_secs(1) {
        (duration.as_secs(), duration.subsec_millis(), "s")
    } else if duration >= Duration::from_millis(1) {
        (duration.as_millis() as u64, duration.subsec_micros() % 1000, "ms")
    } else if duration >= Duration::from_micros(1) {
        (duration.as_micros() as u64, duration.subsec_nanos() % 1000, "µs")
    } else {
        (duration.as_nanos() as u64, 0, "ns")
    }
}

/// Formats `(name, mean, std_dev)` rows into aligned columns.
pub fn format_timing_rows(
    rows: impl IntoIterator<Item = (String, Duration, Duration)>,
) -> SmallVec<[String; MAX_SYSTEMS]> {
    let rows: SmallVec<[_; MAX_SYSTEMS]> = rows
        .into_iter()
        .map(|(name, avg, std)| (name, split_duration(avg), split_duration(std)))
        .collect();

    let name_width = rows.iter().map(|(name, ..)| name.chars().count()).max().unwrap_or(0);
    let avg_width = rows.iter().map(|(_, (int, ..), _)| int.width() as usize).max().unwrap_or(1);
    let std_width = rows.iter().map(|(_, _, (int, ..))| int.width() as usize).max().unwrap_or(1);

    rows.iter()
        .map(|(name, (avg_int, avg_dec, avg_unit), (std_int, std_dec, std_unit))| {
            format!("{name:name_width$} : {avg_int:avg_width$}.{avg_dec:03}{avg_unit:<2} ± {std_int:std_width$}.{std_dec:03}{std_unit}")
        })
        .collect()
}
