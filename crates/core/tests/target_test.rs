use prebun_core::system_env::{SystemArch, SystemOS};
use prebun_core::*;

mod map_target {
    use super::*;

    #[test]
    fn maps_supported_platforms() {
        assert_eq!(
            map_target(SystemOS::Linux, SystemArch::X64, Some(true), None).unwrap(),
            "linux-x64"
        );
        assert_eq!(
            map_target(SystemOS::Linux, SystemArch::Arm64, None, None).unwrap(),
            "linux-aarch64"
        );
        assert_eq!(
            map_target(SystemOS::MacOS, SystemArch::X64, Some(true), None).unwrap(),
            "darwin-x64"
        );
        assert_eq!(
            map_target(SystemOS::MacOS, SystemArch::Arm64, None, None).unwrap(),
            "darwin-aarch64"
        );
    }

    #[test]
    fn uses_baseline_without_avx2() {
        assert_eq!(
            map_target(SystemOS::MacOS, SystemArch::X64, Some(false), None).unwrap(),
            "darwin-x64-baseline"
        );
        assert_eq!(
            map_target(SystemOS::Linux, SystemArch::X64, Some(false), None).unwrap(),
            "linux-x64-baseline"
        );
    }

    #[test]
    fn ignores_avx2_for_arm() {
        assert_eq!(
            map_target(SystemOS::Linux, SystemArch::Arm64, Some(false), None).unwrap(),
            "linux-aarch64"
        );
    }

    #[test]
    fn appends_profile_for_debug_info() {
        let target = map_target(
            SystemOS::MacOS,
            SystemArch::X64,
            Some(true),
            Some(BuildVariant::DebugInfo),
        )
        .unwrap();

        assert_eq!(target, "darwin-x64-profile");
        assert!(target.is_profile());
        assert_eq!(target.exe_name("bun", SystemOS::MacOS), "bun-profile");

        assert_eq!(
            map_target(
                SystemOS::Linux,
                SystemArch::X64,
                Some(false),
                Some(BuildVariant::DebugInfo)
            )
            .unwrap(),
            "linux-x64-baseline-profile"
        );
    }

    #[test]
    fn errors_for_windows() {
        for arch in [SystemArch::X64, SystemArch::Arm64, SystemArch::X86] {
            assert!(matches!(
                map_target(SystemOS::Windows, arch, Some(true), None),
                Err(PrebunTargetError::UnsupportedPlatform { .. })
            ));
        }
    }

    #[test]
    fn errors_for_unsupported_arch() {
        assert!(matches!(
            map_target(SystemOS::Linux, SystemArch::X86, Some(true), None),
            Err(PrebunTargetError::UnsupportedPlatform { .. })
        ));
        assert!(matches!(
            map_target(SystemOS::MacOS, SystemArch::Arm, None, None),
            Err(PrebunTargetError::UnsupportedPlatform { .. })
        ));
    }

    #[test]
    fn errors_when_avx2_unknown_for_x64() {
        assert!(matches!(
            map_target(SystemOS::Linux, SystemArch::X64, None, None),
            Err(PrebunTargetError::UnknownAvx2 { target }) if target == "linux-x64"
        ));
    }
}

mod target_id {
    use super::*;

    #[test]
    fn names_archive_files() {
        let target = PlatformKey::new(SystemOS::Linux, SystemArch::X64)
            .with_avx2(Some(true))
            .to_target()
            .unwrap();

        assert_eq!(target.archive_dir_name("bun"), "bun-linux-x64");
        assert_eq!(target.archive_file_name("bun"), "bun-linux-x64.zip");
        assert_eq!(target.exe_name("bun", SystemOS::Linux), "bun");
        assert_eq!(target.to_string(), "linux-x64");
    }

    #[test]
    fn parses_variants() {
        assert_eq!(
            "debug-info".parse::<BuildVariant>().unwrap(),
            BuildVariant::DebugInfo
        );
        assert!("release".parse::<BuildVariant>().is_err());
    }
}
