use serde::{Deserialize, Serialize};

/// Counters of `GET /tableau-de-bord` for the current school year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub classes: u32,
    pub eleves: u32,
    pub eleves_non_affectes: u32,
    pub personnel: u32,
    pub salles: u32,
    pub evaluations: u32,
}

impl DashboardStats {
    /// Share of enrolled students already placed in a class, 0..=100.
    pub fn taux_affectation(&self) -> u32 {
        if self.eleves == 0 {
            return 0;
        }
        let affectes = self.eleves.saturating_sub(self.eleves_non_affectes);
        ((affectes as f64 / self.eleves as f64) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_counters_default_to_zero() {
        let stats: DashboardStats = serde_json::from_str(r#"{"eleves":40,"elevesNonAffectes":10}"#).unwrap();
        assert_eq!(stats.classes, 0);
        assert_eq!(stats.taux_affectation(), 75);
        assert_eq!(DashboardStats::default().taux_affectation(), 0);
    }
}
