//! Line-by-line match processing
//!
//! [`Game`] runs each line through the pattern catalogue and broadcasts the
//! resulting event: first to the round tracker, then to every aggregator in
//! registration order. Nothing is reported until [`Game::finish`] has run
//! the closing computations.

pub mod output;

pub use output::MatchReport;

use serde::{Deserialize, Serialize};

use crate::core::config::ParserConfig;
use crate::events::DomainEvent;
use crate::parse::catalogue::{LineOutcome, PatternCatalogue};
use crate::stats::{
    ChatModule, GameStateTracker, MatchState, PlayerClassStatsModule, PlayerStatsModule,
    PvcModule, PvpModule, RealDamageModule, StatsModule, TeamStatsModule,
};

/// Per-outcome line counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStats {
    pub lines: u64,
    /// No parsable timestamp prefix
    pub malformed: u64,
    pub unrecognized: u64,
    /// Matched a rule that produced no event
    pub dropped: u64,
    pub dispatched: u64,
}

/// Aggregators in dispatch order
#[derive(Debug)]
struct Modules {
    teams: TeamStatsModule,
    players: PlayerStatsModule,
    player_classes: PlayerClassStatsModule,
    pvp: PvpModule,
    pvc: PvcModule,
    real_damage: RealDamageModule,
    chat: ChatModule,
}

impl Modules {
    fn new(config: &ParserConfig) -> Self {
        Self {
            teams: TeamStatsModule::new(),
            players: PlayerStatsModule::new(),
            player_classes: PlayerClassStatsModule::new(),
            pvp: PvpModule::new(),
            pvc: PvcModule::new(),
            real_damage: RealDamageModule::new(config.real_damage_window_secs),
            chat: ChatModule::new(),
        }
    }

    fn all_mut(&mut self) -> [&mut dyn StatsModule; 7] {
        [
            &mut self.teams,
            &mut self.players,
            &mut self.player_classes,
            &mut self.pvp,
            &mut self.pvc,
            &mut self.real_damage,
            &mut self.chat,
        ]
    }
}

pub struct Game {
    config: ParserConfig,
    catalogue: PatternCatalogue,
    tracker: GameStateTracker,
    modules: Modules,
    line_stats: LineStats,
    finished: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self::with_catalogue(config, PatternCatalogue::with_defaults())
    }

    pub fn with_catalogue(config: ParserConfig, catalogue: PatternCatalogue) -> Self {
        let modules = Modules::new(&config);
        Self {
            config,
            catalogue,
            tracker: GameStateTracker::new(),
            modules,
            line_stats: LineStats::default(),
            finished: false,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        self.tracker.state()
    }

    pub fn line_stats(&self) -> LineStats {
        self.line_stats
    }

    /// Parse one raw log line and dispatch its event, if any
    pub fn process_line(&mut self, line: &str) {
        let line = line.trim_end_matches('\r');
        self.line_stats.lines += 1;

        match self.catalogue.extract(line, &self.config) {
            LineOutcome::Malformed => {
                self.line_stats.malformed += 1;
                tracing::trace!("Line {}: no timestamp", self.line_stats.lines);
            }
            LineOutcome::Unrecognized => {
                self.line_stats.unrecognized += 1;
                tracing::trace!("Line {}: no matching rule", self.line_stats.lines);
            }
            LineOutcome::Dropped { rule } => {
                self.line_stats.dropped += 1;
                tracing::trace!("Line {}: {} produced no event", self.line_stats.lines, rule);
            }
            LineOutcome::Event { event, .. } => {
                self.line_stats.dispatched += 1;
                self.dispatch(&event);
            }
        }
    }

    /// Broadcast an event: round tracker first, then each aggregator in order
    pub fn dispatch(&mut self, event: &DomainEvent) {
        self.tracker.apply(event);
        let state = self.tracker.state();
        for module in self.modules.all_mut() {
            module.handle(state, event);
        }
    }

    /// Run closing computations; later calls are no-ops
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        for module in self.modules.all_mut() {
            module.finish();
            tracing::debug!("Finished module {}", module.name());
        }

        let stats = self.line_stats;
        tracing::debug!(
            "Processed {} lines: {} dispatched, {} dropped, {} unrecognized, {} malformed",
            stats.lines,
            stats.dispatched,
            stats.dropped,
            stats.unrecognized,
            stats.malformed
        );
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Snapshot of every aggregator's output
    pub fn report(&self) -> MatchReport {
        let modules = &self.modules;
        MatchReport {
            game: self.tracker.report(),
            teams: modules.teams.report(),
            players: modules.players.report(),
            player_classes: modules.player_classes.report(),
            pvp: modules.pvp.report(),
            pvc: modules.pvc.report(),
            real_damage: modules.real_damage.report(),
            chat: modules.chat.report(),
        }
    }

    pub fn into_report(mut self) -> MatchReport {
        self.finish();
        self.report()
    }
}

/// Parse a complete log with the default configuration
pub fn parse_lines<I, S>(lines: I) -> MatchReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_lines_with_config(lines, ParserConfig::default())
}

pub fn parse_lines_with_config<I, S>(lines: I, config: ParserConfig) -> MatchReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut game = Game::with_config(config);
    for line in lines {
        game.process_line(line.as_ref());
    }
    game.into_report()
}
