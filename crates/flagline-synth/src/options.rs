use serde::{Deserialize, Serialize};

/// Top-level fields the editor actually touched.
///
/// Fields left unmarked are skipped even when they differ between the
/// snapshots. `reset_sampling_seed` is an explicit request, not a diffable
/// field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchedFields {
    pub enabled: bool,
    pub prerequisites: bool,
    pub targets: bool,
    pub rules: bool,
    pub default_strategy: bool,
    pub off_variation: bool,
    pub reset_sampling_seed: bool,
}

impl TouchedFields {
    /// Nothing touched.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every diffable field touched. The sampling seed is not reset.
    pub fn all() -> Self {
        Self {
            enabled: true,
            prerequisites: true,
            targets: true,
            rules: true,
            default_strategy: true,
            off_variation: true,
            reset_sampling_seed: false,
        }
    }

    /// Mark a field by name. Returns `false` for an unknown name.
    pub fn touch(&mut self, field: &str) -> bool {
        let flag = match field {
            "enabled" => &mut self.enabled,
            "prerequisites" => &mut self.prerequisites,
            "targets" => &mut self.targets,
            "rules" => &mut self.rules,
            "default_strategy" => &mut self.default_strategy,
            "off_variation" => &mut self.off_variation,
            "reset_sampling_seed" => &mut self.reset_sampling_seed,
            _ => return false,
        };
        *flag = true;
        true
    }
}

/// Configuration for one synthesis call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisOptions {
    /// Which top-level fields to diff.
    pub touched: TouchedFields,
    /// Report a fixed-to-fixed variation change as a whole-strategy
    /// replacement (`ChangeRuleStrategy`) instead of `ChangeFixedStrategy`.
    pub fold_fixed_variation_change: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            touched: TouchedFields::none(),
            fold_fixed_variation_change: true,
        }
    }
}

impl SynthesisOptions {
    pub fn new(touched: TouchedFields) -> Self {
        Self {
            touched,
            ..Default::default()
        }
    }

    /// Options with every diffable field touched.
    pub fn all() -> Self {
        Self::new(TouchedFields::all())
    }

    pub fn with_fold_fixed_variation_change(mut self, fold: bool) -> Self {
        self.fold_fixed_variation_change = fold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_touches_nothing_and_folds() {
        let options = SynthesisOptions::default();
        assert_eq!(options.touched, TouchedFields::none());
        assert!(options.fold_fixed_variation_change);
    }

    #[test]
    fn all_leaves_reset_off() {
        let touched = TouchedFields::all();
        assert!(touched.rules && touched.targets && touched.enabled);
        assert!(!touched.reset_sampling_seed);
    }

    #[test]
    fn touch_by_name() {
        let mut touched = TouchedFields::none();
        assert!(touched.touch("off_variation"));
        assert!(touched.off_variation);
        assert!(!touched.touch("bogus"));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let options: SynthesisOptions = toml::from_str(
            r#"
            fold_fixed_variation_change = false

            [touched]
            rules = true
            "#,
        )
        .unwrap();
        assert!(!options.fold_fixed_variation_change);
        assert!(options.touched.rules);
        assert!(!options.touched.targets);
    }
}
