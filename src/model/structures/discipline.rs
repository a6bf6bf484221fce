use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Racing discipline. The engine itself is discipline-agnostic; this is
/// carried through so hosts can filter races before invoking a run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Discipline {
    Mx,
    Sx,
    All
}

impl Default for Discipline {
    fn default() -> Self {
        Discipline::All
    }
}
