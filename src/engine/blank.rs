use std::fmt::{Display, Error, Formatter};

use crate::{MatchEngine, MatchRange};

//------------------------------------------------------------------------------
// Blank engine, the empty query matches everything and highlights nothing
#[derive(Debug, Default)]
pub struct BlankEngine;

impl MatchEngine for BlankEngine {
    fn matches(&self, _text: &str) -> bool {
        true
    }

    fn matching_regions(&self, _text: &str) -> Option<Vec<MatchRange>> {
        Some(Vec::new())
    }
}

impl Display for BlankEngine {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "(Blank)")
    }
}
