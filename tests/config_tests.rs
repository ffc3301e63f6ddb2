use std::time::Duration;

use photo_carousel::config::Configuration;

#[test]
fn default_configuration_validates() {
    let cfg = Configuration::default().validated().unwrap();
    assert_eq!(cfg.frame_interval, Duration::from_millis(16));
    assert!(cfg.photo_library_path.is_none());
}

#[test]
fn yaml_overrides_are_kebab_case() {
    let yaml = r#"
photo-library-path: /photos
frame-interval: 20ms
loader-max-concurrent-decodes: 2
card:
  content-width: 1.0
  content-height: 2.0
helix:
  max-radius: 5.0
  turns: 6.0
galaxy:
  r-min: 3.0
  flatten: 0.5
motion:
  ambient-scale: 1.2
  focused-scale: 3.0
  initial-scale: 0.1
  focus-point: [0.0, 1.0, 5.0]
  position-spring:
    stiffness: 30.0
    damping: 11.0
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let cfg = cfg.validated().unwrap();

    assert_eq!(
        cfg.photo_library_path.as_deref(),
        Some(std::path::Path::new("/photos"))
    );
    assert_eq!(cfg.frame_interval, Duration::from_millis(20));
    assert_eq!(cfg.loader_max_concurrent_decodes, 2);
    assert!((cfg.card.aspect() - 0.5).abs() < 1e-6);
    assert_eq!(cfg.helix.max_radius, 5.0);
    assert_eq!(cfg.galaxy.r_min, 3.0);
    assert_eq!(cfg.motion.focused_scale, 3.0);
    assert_eq!(cfg.motion.focus_point, [0.0, 1.0, 5.0]);
    assert_eq!(cfg.motion.position_spring.stiffness, 30.0);
    // Untouched sections keep their defaults.
    assert_eq!(cfg.motion.scale_spring.stiffness, 90.0);
}

#[test]
fn initial_scale_must_sit_below_ambient() {
    let yaml = r#"
motion:
  ambient-scale: 1.0
  initial-scale: 1.5
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let err = cfg.validated().unwrap_err();
    assert!(err.to_string().contains("initial-scale"));
}

#[test]
fn zero_frame_interval_is_rejected() {
    let yaml = "frame-interval: 0s\n";
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert!(cfg.validated().is_err());
}

#[test]
fn degenerate_springs_are_rejected() {
    let yaml = r#"
motion:
  scale-spring:
    stiffness: 0.0
    damping: 10.0
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let err = cfg.validated().unwrap_err();
    assert!(err.to_string().contains("scale-spring"));
}

#[test]
fn flatten_outside_unit_interval_is_rejected() {
    let yaml = "galaxy:\n  flatten: 1.5\n";
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert!(cfg.validated().is_err());
}
