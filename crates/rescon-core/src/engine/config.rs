use crate::core::models::residue::DEFAULT_ANCHOR_ATOM;
use thiserror::Error;

/// Default inter-atomic distance cutoff for a contact, in Angstroms.
pub const DEFAULT_CUTOFF: f64 = 5.0;

/// Anchor-distance threshold used by the original pipeline regardless of cutoff.
pub const LEGACY_PRUNING_BOUND: f64 = 15.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Anchor atom name must not be empty")]
    EmptyAnchorAtom,
    #[error("Invalid value for {name}: {value} (must be finite and non-negative)")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// How the anchor-distance threshold of the pruning pass is obtained.
///
/// Two residues whose atoms lie within `r` of their anchors can only have an
/// atom pair closer than `cutoff` if their anchors are closer than
/// `2 * r + cutoff`. The variants differ in where `r` comes from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PruningBound {
    /// `r` is the largest anchor-to-atom distance found in the structure itself.
    /// Pruning never discards a contact.
    #[default]
    Measured,
    /// `r` is fixed (e.g. 5.0 for standard amino acids).
    Radius(f64),
    /// A fixed anchor-distance threshold, independent of the cutoff.
    Fixed(f64),
}

impl PruningBound {
    /// Resolves the anchor-distance threshold for one extraction.
    ///
    /// `measured_radius` is only evaluated for [`PruningBound::Measured`].
    pub fn resolve(&self, cutoff: f64, measured_radius: impl FnOnce() -> f64) -> f64 {
        match *self {
            PruningBound::Measured => 2.0 * measured_radius() + cutoff,
            PruningBound::Radius(radius) => 2.0 * radius + cutoff,
            PruningBound::Fixed(bound) => bound,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let (name, value) = match *self {
            PruningBound::Measured => return Ok(()),
            PruningBound::Radius(r) => ("max_residue_radius", r),
            PruningBound::Fixed(b) => ("pruning_bound", b),
        };
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidParameter { name, value })
        }
    }
}

/// Parameters of one contact extraction.
///
/// The cutoff is deliberately not validated: a non-positive cutoff is a
/// well-defined request whose answer is the empty contact set.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactConfig {
    pub cutoff: f64,
    pub anchor_atom: String,
    pub pruning: PruningBound,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            anchor_atom: DEFAULT_ANCHOR_ATOM.to_string(),
            pruning: PruningBound::default(),
        }
    }
}

#[derive(Default)]
pub struct ContactConfigBuilder {
    cutoff: Option<f64>,
    anchor_atom: Option<String>,
    pruning: Option<PruningBound>,
}

impl ContactConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn anchor_atom(mut self, name: &str) -> Self {
        self.anchor_atom = Some(name.trim().to_string());
        self
    }
    pub fn pruning(mut self, pruning: PruningBound) -> Self {
        self.pruning = Some(pruning);
        self
    }

    pub fn build(self) -> Result<ContactConfig, ConfigError> {
        let anchor_atom = self
            .anchor_atom
            .unwrap_or_else(|| DEFAULT_ANCHOR_ATOM.to_string());
        if anchor_atom.is_empty() {
            return Err(ConfigError::EmptyAnchorAtom);
        }
        let pruning = self.pruning.unwrap_or_default();
        pruning.validate()?;
        Ok(ContactConfig {
            cutoff: self.cutoff.unwrap_or(DEFAULT_CUTOFF),
            anchor_atom,
            pruning,
        })
    }
}

/// Parameters of the chain preparation workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareConfig {
    pub pfam_domain: String,
    pub remove_heteroatoms: bool,
    pub remove_hydrogens: bool,
    pub overwrite: bool,
}

#[derive(Default)]
pub struct PrepareConfigBuilder {
    pfam_domain: Option<String>,
    remove_heteroatoms: Option<bool>,
    remove_hydrogens: Option<bool>,
    overwrite: Option<bool>,
}

impl PrepareConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pfam_domain(mut self, domain: &str) -> Self {
        self.pfam_domain = Some(domain.trim().to_string());
        self
    }
    pub fn remove_heteroatoms(mut self, remove: bool) -> Self {
        self.remove_heteroatoms = Some(remove);
        self
    }
    pub fn remove_hydrogens(mut self, remove: bool) -> Self {
        self.remove_hydrogens = Some(remove);
        self
    }
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    pub fn build(self) -> Result<PrepareConfig, ConfigError> {
        let pfam_domain = self
            .pfam_domain
            .filter(|d| !d.is_empty())
            .ok_or(ConfigError::MissingParameter("pfam_domain"))?;
        Ok(PrepareConfig {
            pfam_domain,
            remove_heteroatoms: self.remove_heteroatoms.unwrap_or(true),
            remove_hydrogens: self.remove_hydrogens.unwrap_or(true),
            overwrite: self.overwrite.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default_config() {
        let config = ContactConfigBuilder::new().build().unwrap();
        assert_eq!(config, ContactConfig::default());
        assert_eq!(config.cutoff, 5.0);
        assert_eq!(config.anchor_atom, "CA");
        assert_eq!(config.pruning, PruningBound::Measured);
    }

    #[test]
    fn builder_applies_all_values() {
        let config = ContactConfigBuilder::new()
            .cutoff(8.0)
            .anchor_atom(" CB ")
            .pruning(PruningBound::Fixed(LEGACY_PRUNING_BOUND))
            .build()
            .unwrap();
        assert_eq!(config.cutoff, 8.0);
        assert_eq!(config.anchor_atom, "CB");
        assert_eq!(config.pruning, PruningBound::Fixed(15.0));
    }

    #[test]
    fn non_positive_cutoff_is_accepted() {
        let config = ContactConfigBuilder::new().cutoff(-1.0).build().unwrap();
        assert_eq!(config.cutoff, -1.0);
    }

    #[test]
    fn empty_anchor_atom_is_rejected() {
        let result = ContactConfigBuilder::new().anchor_atom("  ").build();
        assert_eq!(result, Err(ConfigError::EmptyAnchorAtom));
    }

    #[test]
    fn negative_or_non_finite_pruning_parameters_are_rejected() {
        let result = ContactConfigBuilder::new()
            .pruning(PruningBound::Radius(-1.0))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "max_residue_radius",
                ..
            })
        ));
        let result = ContactConfigBuilder::new()
            .pruning(PruningBound::Fixed(f64::NAN))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "pruning_bound",
                ..
            })
        ));
    }

    #[test]
    fn pruning_bound_resolution() {
        assert_eq!(PruningBound::Measured.resolve(5.0, || 3.0), 11.0);
        assert_eq!(PruningBound::Radius(5.0).resolve(5.0, || unreachable!()), 15.0);
        assert_eq!(PruningBound::Radius(5.0).resolve(10.0, || unreachable!()), 20.0);
        assert_eq!(PruningBound::Fixed(15.0).resolve(12.0, || unreachable!()), 15.0);
    }

    #[test]
    fn prepare_builder_requires_domain_and_defaults_cleaning_on() {
        assert_eq!(
            PrepareConfigBuilder::new().build(),
            Err(ConfigError::MissingParameter("pfam_domain"))
        );
        let config = PrepareConfigBuilder::new()
            .pfam_domain("PF00071")
            .build()
            .unwrap();
        assert!(config.remove_heteroatoms);
        assert!(config.remove_hydrogens);
        assert!(!config.overwrite);
    }
}
