//! Exercise dispatch - tag → cached counter, plus the engine facade
//!
//! The registry is routing and caching only; all geometry lives in the
//! counters. Counters are built on first use and keep their calibration
//! and dwell history until reset.

use std::collections::HashMap;

use log::info;

use crate::clock::{Clock, MonotonicClock};
use crate::config::EngineConfig;
use crate::counter::{Analysis, AnalysisResult, CounterSnapshot, RepCounter};
use crate::error::EngineResult;
use crate::exercise::ExerciseType;
use crate::logging::LOG_TARGET;
use crate::pose::Pose;

/// Lazily-built counter per exercise tag
pub struct StrategyRegistry {
    config: EngineConfig,
    counters: HashMap<ExerciseType, RepCounter>,
}

impl StrategyRegistry {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            counters: HashMap::new(),
        }
    }

    /// Counter for `exercise`, created on first request
    pub fn get_or_create(&mut self, exercise: ExerciseType) -> &mut RepCounter {
        let config = &self.config;
        self.counters
            .entry(exercise)
            .or_insert_with(|| RepCounter::new(exercise, config))
    }

    pub fn get(&self, exercise: ExerciseType) -> Option<&RepCounter> {
        self.counters.get(&exercise)
    }

    pub fn is_cached(&self, exercise: ExerciseType) -> bool {
        self.counters.contains_key(&exercise)
    }

    /// Clear one exercise's state (no-op if never used)
    pub fn reset(&mut self, exercise: ExerciseType) {
        if let Some(counter) = self.counters.get_mut(&exercise) {
            counter.reset();
        }
    }

    pub fn reset_all(&mut self) {
        for counter in self.counters.values_mut() {
            counter.reset();
        }
    }
}

/// The engine's public contract: select an exercise, reset, analyze frames
///
/// Owned by the caller's session. Separate sessions need separate engines.
pub struct RepEngine {
    registry: StrategyRegistry,
    active: ExerciseType,
    clock: Box<dyn Clock>,
}

impl RepEngine {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        Self::with_clock(config, MonotonicClock::new())
    }

    pub fn with_clock(config: EngineConfig, clock: impl Clock + 'static) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            registry: StrategyRegistry::new(config),
            active: ExerciseType::Squat,
            clock: Box::new(clock),
        })
    }

    pub fn exercise_type(&self) -> ExerciseType {
        self.active
    }

    /// Switch exercise. Switching to a different tag starts that exercise fresh.
    pub fn set_exercise_type(&mut self, exercise: ExerciseType) {
        if exercise == self.active {
            return;
        }
        info!(target: LOG_TARGET, "exercise changed {} -> {}", self.active, exercise);
        self.registry.reset(exercise);
        self.active = exercise;
    }

    /// Reset the active exercise (set start or explicit restart)
    pub fn reset(&mut self) {
        self.registry.reset(self.active);
    }

    pub fn reset_all(&mut self) {
        self.registry.reset_all();
    }

    pub fn analyze(&mut self, pose: &Pose, current_count: u32, video_height: Option<u32>) -> AnalysisResult {
        let now = self.clock.now();
        self.registry
            .get_or_create(self.active)
            .analyze(pose, current_count, video_height, now)
    }

    pub fn analyze_detailed(&mut self, pose: &Pose, current_count: u32, video_height: Option<u32>) -> Analysis {
        let now = self.clock.now();
        self.registry
            .get_or_create(self.active)
            .analyze_detailed(pose, current_count, video_height, now)
    }

    /// Internal state of the active exercise's counter
    pub fn snapshot(&mut self) -> CounterSnapshot {
        self.registry.get_or_create(self.active).snapshot()
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }
}
