//! Ordered pattern catalogue
//!
//! Rules are tried in insertion order and the first matching rule owns the
//! line, even when a later rule would also match. A rule without a builder
//! recognises a line kind without producing an event.

use crate::core::config::ParserConfig;
use crate::events::{DomainEvent, EventKind};
use crate::parse::builders;
use crate::parse::patterns::{self, Captures};
use crate::parse::properties::{extract_properties, Properties};
use crate::parse::timestamp::split_line;

pub type Matcher = for<'a> fn(&'a str) -> Option<Captures<'a>>;
pub type Builder = fn(&Captures<'_>, &BuildContext<'_>) -> Option<EventKind>;

/// Everything a builder may consult besides its captures
pub struct BuildContext<'a> {
    pub properties: &'a Properties<'a>,
    pub config: &'a ParserConfig,
}

/// A named line pattern with an optional event builder
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matcher: Matcher,
    pub builder: Option<Builder>,
}

impl Rule {
    pub fn new(name: &'static str, matcher: Matcher, builder: Builder) -> Self {
        Self {
            name,
            matcher,
            builder: Some(builder),
        }
    }

    /// A rule that recognises lines but never builds an event
    pub fn recognise_only(name: &'static str, matcher: Matcher) -> Self {
        Self {
            name,
            matcher,
            builder: None,
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("has_builder", &self.builder.is_some())
            .finish()
    }
}

/// What became of one raw line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Timestamp prefix missing or invalid
    Malformed,
    /// No rule matched the event text
    Unrecognized,
    /// A rule matched but produced no event
    Dropped { rule: &'static str },
    Event { rule: &'static str, event: DomainEvent },
}

#[derive(Debug, Clone, Default)]
pub struct PatternCatalogue {
    rules: Vec<Rule>,
}

impl PatternCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard rule set, in matching priority order
    pub fn with_defaults() -> Self {
        let mut catalogue = Self::new();

        catalogue.add(Rule::new("damage", patterns::damage, builders::damage));
        catalogue.add(Rule::new("healed", patterns::healed, builders::heal));
        catalogue.add(Rule::new("shot_fired", patterns::shot_fired, builders::shot));
        catalogue.add(Rule::new("shot_hit", patterns::shot_hit, builders::shot_hit));
        catalogue.add(Rule::new("kill", patterns::kill, builders::kill));
        catalogue.add(Rule::new("kill_assist", patterns::kill_assist, builders::assist));
        catalogue.add(Rule::new("pickup", patterns::pickup, builders::pickup));
        catalogue.add(Rule::new("suicide", patterns::suicide, builders::suicide));
        catalogue.add(Rule::new("spawn", patterns::spawn, builders::spawn));
        catalogue.add(Rule::new("role_change", patterns::role_change, builders::role_change));
        catalogue.add(Rule::new("point_captured", patterns::point_captured, builders::capture));
        catalogue.add(Rule::new("medic_death", patterns::medic_death, builders::medic_death));
        catalogue.add(Rule::new("round_start", patterns::round_start, builders::round_start));
        catalogue.add(Rule::new("round_end", patterns::round_end, builders::round_end));
        catalogue.add(Rule::new("game_over", patterns::game_over, builders::game_over));
        catalogue.add(Rule::new("join_team", patterns::join_team, builders::join_team));
        catalogue.add(Rule::new("disconnect", patterns::disconnect, builders::disconnect));
        catalogue.add(Rule::new("charge_deployed", patterns::charge_deployed, builders::charge));
        catalogue.add(Rule::new("chat", patterns::chat, builders::chat));
        catalogue.add(Rule::new("team_chat", patterns::team_chat, builders::team_chat));
        catalogue.add(Rule::new("built_object", patterns::built_object, builders::build));
        catalogue.add(Rule::new("flag_event", patterns::flag_event, builders::flag));
        catalogue.add(Rule::new("team_score", patterns::team_score, builders::score));
        catalogue.add(Rule::new("pause", patterns::pause, builders::pause));
        catalogue.add(Rule::new("unpause", patterns::unpause, builders::unpause));
        catalogue.add(Rule::new("map_load", patterns::map_load, builders::map_load));

        catalogue
    }

    /// Append a rule at the lowest priority
    pub fn add(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rule names in priority order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }

    /// First rule whose matcher accepts `body`, with its captures
    pub fn find_match<'a>(&self, body: &'a str) -> Option<(&Rule, Captures<'a>)> {
        self.rules
            .iter()
            .find_map(|rule| (rule.matcher)(body).map(|caps| (rule, caps)))
    }

    /// Run one raw line through timestamp parsing, matching and building
    pub fn extract(&self, line: &str, config: &ParserConfig) -> LineOutcome {
        let Some((timestamp, body)) = split_line(line) else {
            return LineOutcome::Malformed;
        };
        let Some((rule, caps)) = self.find_match(body) else {
            return LineOutcome::Unrecognized;
        };

        let properties = extract_properties(body);
        let ctx = BuildContext {
            properties: &properties,
            config,
        };

        match rule.builder.and_then(|build| build(&caps, &ctx)) {
            Some(kind) => LineOutcome::Event {
                rule: rule.name,
                event: DomainEvent::new(timestamp, kind),
            },
            None => LineOutcome::Dropped { rule: rule.name },
        }
    }
}
