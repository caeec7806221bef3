use crate::engine::blank::BlankEngine;
use crate::engine::camel::CamelCaseEngine;
use crate::engine::exact::{ExactEngine, ExactMatchingParam};
use crate::engine::glob::GlobEngine;
use crate::{CaseFolding, Classification, MatchEngine, MatchRule};

//------------------------------------------------------------------------------
/// Builds the engine a classified query asks for
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngineFactory {
    case: CaseFolding,
}

impl RuleEngineFactory {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn case(mut self, case: CaseFolding) -> Self {
        self.case = case;
        self
    }

    pub fn build(self) -> Self {
        self
    }

    pub fn create_engine(&self, classification: &Classification) -> Box<dyn MatchEngine> {
        let Classification {
            rule,
            text,
            force_prefix,
            force_suffix,
        } = classification;
        let literal = |prefix: bool, postfix: bool| {
            ExactEngine::builder(
                text,
                ExactMatchingParam {
                    prefix,
                    postfix,
                    case: self.case,
                },
            )
            .build()
        };

        let engine: Box<dyn MatchEngine> = match rule {
            MatchRule::Blank => Box::new(BlankEngine),
            MatchRule::Exact => Box::new(literal(true, true)),
            MatchRule::Prefix => Box::new(literal(true, false)),
            MatchRule::Substring => Box::new(literal(false, false)),
            MatchRule::Pattern => Box::new(GlobEngine::builder(text, *force_prefix, *force_suffix, self.case).build()),
            MatchRule::CamelCase => {
                Box::new(CamelCaseEngine::builder(text, *force_prefix, *force_suffix, self.case).build())
            }
        };
        debug!("engine: {engine}");
        engine
    }
}
