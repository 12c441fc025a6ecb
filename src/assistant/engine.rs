//! Abstention-capable suggestion rules.
//!
//! [`propose`] walks a fixed, ordered rule list and returns the first
//! suggestion whose preconditions hold. It never mutates anything and returns
//! `None` rather than forcing a suggestion.

use super::catalogue::TemplateId;
use crate::draw::{Frame, ShapeKind};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Why a suggestion query was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerKind {
    /// The user explicitly asked for help
    #[default]
    Manual,
    /// Fired right after a shape was created
    Auto,
}

impl TriggerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerKind::Manual => "manual",
            TriggerKind::Auto => "auto",
        }
    }
}

impl FromStr for TriggerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(TriggerKind::Manual),
            "auto" => Ok(TriggerKind::Auto),
            other => Err(format!("unknown trigger '{other}'")),
        }
    }
}

/// Identifier of a suggestion rule; the unit of auto-suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionId {
    CatEars,
    Roof,
}

impl SuggestionId {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionId::CatEars => "CAT_EARS",
            SuggestionId::Roof => "ROOF",
        }
    }
}

impl fmt::Display for SuggestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CAT_EARS" => Ok(SuggestionId::CatEars),
            "ROOF" => Ok(SuggestionId::Roof),
            other => Err(format!("unknown suggestion '{other}'")),
        }
    }
}

/// Signals the engine decides from. Missing flags default to `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionContext {
    pub trigger: TriggerKind,
    /// Kind of the shape just created; only consulted for [`TriggerKind::Auto`]
    pub created_kind: Option<ShapeKind>,
    pub has_ellipse: bool,
    pub has_cat_ears: bool,
    pub has_rect: bool,
    pub has_roof: bool,
    /// Suggestions the user dismissed this session; blocks auto triggers only
    pub auto_suppressed: HashSet<SuggestionId>,
}

impl SuggestionContext {
    /// Derives the presence flags from the shapes currently on the canvas.
    pub fn from_frame(
        frame: &Frame,
        trigger: TriggerKind,
        created_kind: Option<ShapeKind>,
        auto_suppressed: &HashSet<SuggestionId>,
    ) -> Self {
        Self {
            trigger,
            created_kind,
            has_ellipse: frame.has_user_kind(ShapeKind::Ellipse),
            has_cat_ears: frame.has_template(TemplateId::CAT_EARS),
            has_rect: frame.has_user_kind(ShapeKind::Rect),
            has_roof: frame.has_template(TemplateId::ROOF),
            auto_suppressed: auto_suppressed.clone(),
        }
    }
}

/// A proposed templated addition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: SuggestionId,
    /// Catalogue entry to instantiate on acceptance
    pub template: TemplateId,
    /// 0-100, lower means more confident
    pub uncertainty: u8,
    /// Up to three short reasons, most important first
    pub rationale: Vec<&'static str>,
}

struct Rule {
    id: SuggestionId,
    template: TemplateId,
    /// Shape kind whose creation may auto-trigger this rule
    trigger_kind: ShapeKind,
    uncertainty: u8,
    rationale: [&'static str; 3],
    eligible: fn(&SuggestionContext) -> bool,
}

impl Rule {
    fn matches(&self, ctx: &SuggestionContext) -> bool {
        if !(self.eligible)(ctx) {
            return false;
        }
        match ctx.trigger {
            TriggerKind::Manual => true,
            TriggerKind::Auto => {
                ctx.created_kind == Some(self.trigger_kind)
                    && !ctx.auto_suppressed.contains(&self.id)
            }
        }
    }

    fn suggestion(&self) -> Suggestion {
        Suggestion {
            id: self.id,
            template: self.template,
            uncertainty: self.uncertainty,
            rationale: self.rationale.to_vec(),
        }
    }
}

// Evaluated in order; the first match wins.
const RULES: [Rule; 2] = [
    Rule {
        id: SuggestionId::CatEars,
        template: TemplateId::CAT_EARS,
        trigger_kind: ShapeKind::Ellipse,
        uncertainty: 70,
        rationale: [
            "an ellipse is present (possible head)",
            "no ears detected yet",
            "suggestion is optional",
        ],
        eligible: |ctx| ctx.has_ellipse && !ctx.has_cat_ears,
    },
    Rule {
        id: SuggestionId::Roof,
        template: TemplateId::ROOF,
        trigger_kind: ShapeKind::Rect,
        uncertainty: 65,
        rationale: [
            "a rectangle is present (possible wall/facade)",
            "no roof detected yet",
            "a triangle will be added above to form a roof",
        ],
        eligible: |ctx| ctx.has_rect && !ctx.has_roof,
    },
];

/// Returns the first applicable suggestion, or `None` to abstain.
pub fn propose(ctx: &SuggestionContext) -> Option<Suggestion> {
    RULES
        .iter()
        .find(|rule| rule.matches(ctx))
        .map(Rule::suggestion)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto_ellipse() -> SuggestionContext {
        SuggestionContext {
            trigger: TriggerKind::Auto,
            created_kind: Some(ShapeKind::Ellipse),
            has_ellipse: true,
            ..Default::default()
        }
    }

    #[test]
    fn auto_ellipse_proposes_cat_ears() {
        let suggestion = propose(&auto_ellipse()).expect("cat ears expected");
        assert_eq!(suggestion.id, SuggestionId::CatEars);
        assert_eq!(suggestion.template, TemplateId::CAT_EARS);
        assert_eq!(suggestion.uncertainty, 70);
        assert_eq!(
            suggestion.rationale,
            vec![
                "an ellipse is present (possible head)",
                "no ears detected yet",
                "suggestion is optional",
            ]
        );
    }

    #[test]
    fn suppressed_auto_suggestion_abstains() {
        let mut ctx = auto_ellipse();
        ctx.auto_suppressed.insert(SuggestionId::CatEars);
        assert_eq!(propose(&ctx), None);
    }

    #[test]
    fn suppression_does_not_block_manual_requests() {
        let mut ctx = auto_ellipse();
        ctx.auto_suppressed.insert(SuggestionId::CatEars);
        ctx.trigger = TriggerKind::Manual;
        assert_eq!(propose(&ctx).map(|s| s.id), Some(SuggestionId::CatEars));
    }

    #[test]
    fn cat_ears_wins_when_both_rules_qualify() {
        let ctx = SuggestionContext {
            has_ellipse: true,
            has_rect: true,
            ..Default::default()
        };
        assert_eq!(propose(&ctx).map(|s| s.id), Some(SuggestionId::CatEars));
    }

    #[test]
    fn roof_offered_once_cat_ears_applied() {
        let ctx = SuggestionContext {
            has_ellipse: true,
            has_cat_ears: true,
            has_rect: true,
            ..Default::default()
        };
        let suggestion = propose(&ctx).expect("roof expected");
        assert_eq!(suggestion.id, SuggestionId::Roof);
        assert_eq!(suggestion.uncertainty, 65);
        assert_eq!(suggestion.rationale.len(), 3);
    }

    #[test]
    fn auto_trigger_requires_matching_created_kind() {
        let ctx = SuggestionContext {
            trigger: TriggerKind::Auto,
            created_kind: Some(ShapeKind::Line),
            has_ellipse: true,
            has_rect: true,
            ..Default::default()
        };
        assert_eq!(propose(&ctx), None);

        let ctx = SuggestionContext {
            created_kind: Some(ShapeKind::Rect),
            ..ctx
        };
        assert_eq!(propose(&ctx).map(|s| s.id), Some(SuggestionId::Roof));
    }

    #[test]
    fn auto_without_created_kind_abstains() {
        let ctx = SuggestionContext {
            trigger: TriggerKind::Auto,
            has_ellipse: true,
            ..Default::default()
        };
        assert_eq!(propose(&ctx), None);
    }

    #[test]
    fn default_context_abstains() {
        assert_eq!(propose(&SuggestionContext::default()), None);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let ctx = SuggestionContext {
            has_rect: true,
            ..Default::default()
        };
        assert_eq!(propose(&ctx), propose(&ctx));
        let ctx = auto_ellipse();
        assert_eq!(propose(&ctx), propose(&ctx));
    }

    #[test]
    fn identifiers_round_trip_through_strings() {
        for id in [SuggestionId::CatEars, SuggestionId::Roof] {
            assert_eq!(id.as_str().parse::<SuggestionId>().unwrap(), id);
        }
        assert_eq!("auto".parse::<TriggerKind>().unwrap(), TriggerKind::Auto);
        assert!("sometimes".parse::<TriggerKind>().is_err());
    }
}
