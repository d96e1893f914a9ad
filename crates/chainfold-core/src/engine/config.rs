use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// A rectangular window in the Ramachandran plane, all bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhiPsiWindow {
    pub phi_min: f64,
    pub phi_max: f64,
    pub psi_min: f64,
    pub psi_max: f64,
}

impl PhiPsiWindow {
    pub const fn new(phi_min: f64, phi_max: f64, psi_min: f64, psi_max: f64) -> Self {
        Self {
            phi_min,
            phi_max,
            psi_min,
            psi_max,
        }
    }

    /// NaN angles never fall inside a window.
    pub fn contains(&self, phi: f64, psi: f64) -> bool {
        phi >= self.phi_min && phi <= self.phi_max && psi >= self.psi_min && psi <= self.psi_max
    }
}

/// Per-category window tables for Ramachandran-angle classification.
///
/// A residue takes the category of the first window its (phi, psi) pair
/// falls in, helix checked before sheet before turn.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StructureWindows {
    pub helix: Vec<PhiPsiWindow>,
    pub sheet: Vec<PhiPsiWindow>,
    pub turn: Vec<PhiPsiWindow>,
}

impl Default for StructureWindows {
    fn default() -> Self {
        Self {
            helix: vec![PhiPsiWindow::new(-160.0, 0.0, -100.0, 45.0)],
            sheet: vec![
                PhiPsiWindow::new(-180.0, -10.0, 70.0, 180.0),
                PhiPsiWindow::new(-180.0, -45.0, -180.0, -130.0),
                PhiPsiWindow::new(140.0, 180.0, 90.0, 180.0),
            ],
            turn: vec![PhiPsiWindow::new(30.0, 90.0, -15.0, 95.0)],
        }
    }
}

impl StructureWindows {
    pub fn is_helix(&self, phi: f64, psi: f64) -> bool {
        self.helix.iter().any(|w| w.contains(phi, psi))
    }

    pub fn is_sheet(&self, phi: f64, psi: f64) -> bool {
        self.sheet.iter().any(|w| w.contains(phi, psi))
    }

    pub fn is_turn(&self, phi: f64, psi: f64) -> bool {
        self.turn.iter().any(|w| w.contains(phi, psi))
    }
}

/// Strategy for estimating the amide hydrogen position when the source model
/// carries no explicit hydrogen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HydrogenPlacement {
    /// Trigonal bisector of the N->CA and N<-C(prev) directions.
    TrigonalBisector,
    /// Reverse of the preceding carbonyl C=O direction (the historical
    /// RasMol construction; does not account for cis peptides).
    CarbonylExtension,
}

/// Thresholds and switches for the Kabsch-Sander hydrogen-bond detector.
///
/// Energies are integer hundredths of kcal/mol, matching the historical
/// scaling of the acceptance thresholds; they are not reconciled with a
/// single physical unit on purpose.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HydrogenBondSettings {
    /// Amide hydrogen estimation strategy.
    pub placement: HydrogenPlacement,
    /// Prefer an explicit amide hydrogen over the estimate when one exists.
    pub use_explicit_hydrogens: bool,
    /// A candidate pair is accepted only below this energy.
    pub energy_threshold: i32,
    /// Energies below this are treated as degenerate geometry and dropped.
    pub min_energy: i32,
    /// Donor-acceptor lead atoms farther apart than this are never paired (Angstroms).
    pub max_lead_distance: f64,
    /// Any required interatomic distance below this skips the pair (Angstroms).
    pub min_pair_distance: f64,
    /// Maximum O...H distance for a constructed bond (Angstroms).
    pub max_oh_distance: f64,
}

impl Default for HydrogenBondSettings {
    fn default() -> Self {
        Self {
            placement: HydrogenPlacement::TrigonalBisector,
            use_explicit_hydrogens: true,
            energy_threshold: -500,
            min_energy: -9900,
            max_lead_distance: 9.0,
            min_pair_distance: 0.5,
            max_oh_distance: 3.0,
        }
    }
}

/// Read-only configuration for a classification pass.
///
/// One instance may be shared by any number of polymers; nothing in the
/// engine mutates it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StructureConfig {
    pub windows: StructureWindows,
    pub hydrogen_bond: HydrogenBondSettings,
}

impl StructureConfig {
    /// Loads a configuration from a TOML file; unset fields fall back to the
    /// built-in defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_windows_match_reference_table() {
        let windows = StructureWindows::default();
        assert_eq!(windows.helix.len(), 1);
        assert_eq!(windows.sheet.len(), 3);
        assert_eq!(windows.turn.len(), 1);
        assert!(windows.is_helix(-65.0, -40.0));
        assert!(windows.is_sheet(-120.0, 130.0));
        assert!(windows.is_sheet(-120.0, -150.0));
        assert!(windows.is_turn(60.0, 30.0));
        assert!(!windows.is_helix(60.0, 60.0));
    }

    #[test]
    fn window_contains_rejects_nan() {
        let w = PhiPsiWindow::new(-180.0, 180.0, -180.0, 180.0);
        assert!(!w.contains(f64::NAN, 0.0));
        assert!(!w.contains(0.0, f64::NAN));
        assert!(w.contains(0.0, 0.0));
    }

    #[test]
    fn default_hydrogen_bond_settings_keep_historical_thresholds() {
        let settings = HydrogenBondSettings::default();
        assert_eq!(settings.energy_threshold, -500);
        assert_eq!(settings.min_energy, -9900);
        assert_eq!(settings.max_lead_distance, 9.0);
        assert_eq!(settings.max_oh_distance, 3.0);
        assert_eq!(settings.placement, HydrogenPlacement::TrigonalBisector);
    }

    #[test]
    fn load_reads_partial_config_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[windows.helix]]
phi_min = -100.0
phi_max = -30.0
psi_min = -80.0
psi_max = -5.0

[hydrogen_bond]
placement = "carbonyl-extension"
energy_threshold = -600
"#
        )
        .unwrap();

        let config = StructureConfig::load(file.path()).unwrap();
        assert_eq!(config.windows.helix.len(), 1);
        assert!(config.windows.is_helix(-65.0, -40.0));
        assert!(!config.windows.is_helix(-150.0, 30.0));
        // unset sections keep their defaults
        assert_eq!(config.windows.sheet.len(), 3);
        assert_eq!(
            config.hydrogen_bond.placement,
            HydrogenPlacement::CarbonylExtension
        );
        assert_eq!(config.hydrogen_bond.energy_threshold, -600);
        assert_eq!(config.hydrogen_bond.max_oh_distance, 3.0);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = StructureConfig::load(Path::new("/nonexistent/windows.toml")).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Io { .. }));
    }

    #[test]
    fn load_reports_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "windows = 42").unwrap();
        let err = StructureConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Toml { .. }));
    }
}
