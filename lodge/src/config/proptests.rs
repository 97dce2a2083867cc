//! Property-based tests for configuration merging and validation.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use super::validator::ConfigValidator;
use crate::logging::LogLevel;
use proptest::prelude::*;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
        Just(OutputFormat::Tsv),
        Just(OutputFormat::Table),
    ]
}

fn log_level_strategy() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Quiet),
        Just(LogLevel::Normal),
        Just(LogLevel::Verbose),
    ]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(0u64..=120),
        prop::option::of(0u32..=1000),
        prop::option::of(any::<bool>()),
        prop::option::of(output_format_strategy()),
        prop::option::of(log_level_strategy()),
    )
        .prop_map(
            |(lock, days, autoinit, format, log_mode)| Config {
                maximum_lock_wait_seconds: lock,
                max_range_days: days,
                disable_autoinit: autoinit,
                output_format: format,
                log_mode,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn higher_precedence_wins_when_set(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.max_range_days, high.max_range_days.or(low.max_range_days));
        prop_assert_eq!(merged.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
        prop_assert_eq!(merged.log_mode, high.log_mode.or(low.log_mode));
    }

    #[test]
    fn empty_config_is_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    #[test]
    fn merge_is_associative(
        a in config_strategy(),
        b in config_strategy(),
        c in config_strategy()
    ) {
        let mut left = a.clone();
        ConfigMerger::merge_into(&mut left, &b);
        ConfigMerger::merge_into(&mut left, &c);

        let mut b_then_c = b;
        ConfigMerger::merge_into(&mut b_then_c, &c);
        let mut right = a;
        ConfigMerger::merge_into(&mut right, &b_then_c);

        prop_assert_eq!(left, right);
    }

    #[test]
    fn validation_rejects_exactly_zero_limits(config in config_strategy()) {
        let has_zero = config.maximum_lock_wait_seconds == Some(0)
            || config.max_range_days == Some(0);
        prop_assert_eq!(ConfigValidator::validate(&config).is_err(), has_zero);
    }

    #[test]
    fn yaml_round_trip_preserves_config(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
