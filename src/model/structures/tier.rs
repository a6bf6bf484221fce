use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Competition class tier. `Premier` is the headline class, `Lites` the
/// support class, `Open` everything else (amateur days, one-off opens).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ClassTier {
    Premier,
    Lites,
    Open
}

impl TryFrom<&str> for ClassTier {
    type Error = ();

    fn try_from(v: &str) -> Result<Self, Self::Error> {
        match v.to_ascii_uppercase().as_str() {
            "PREMIER" => Ok(ClassTier::Premier),
            "LITES" => Ok(ClassTier::Lites),
            "OPEN" => Ok(ClassTier::Open),
            _ => Err(())
        }
    }
}

/// Per-tier counter block. Participation, wins, podiums and the like are
/// tracked separately for each class a rider has raced in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounters {
    pub premier: u32,
    pub lites: u32,
    pub open: u32
}

impl TierCounters {
    pub fn get(&self, tier: ClassTier) -> u32 {
        match tier {
            ClassTier::Premier => self.premier,
            ClassTier::Lites => self.lites,
            ClassTier::Open => self.open
        }
    }

    pub fn increment(&mut self, tier: ClassTier) {
        match tier {
            ClassTier::Premier => self.premier += 1,
            ClassTier::Lites => self.lites += 1,
            ClassTier::Open => self.open += 1
        }
    }
}
