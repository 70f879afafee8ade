#[cfg(test)]
mod umbrella_generation_tests {
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use std::fs;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use umbrella::{Generator, GeneratorConfig, TraversalOrder, UmbrellaError, generate};

    fn include_lines(document: &str) -> Vec<&str> {
        document
            .lines()
            .filter(|l| l.starts_with("#include"))
            .collect()
    }

    fn polywog_tree() -> TempDir {
        let src = TempDir::new().unwrap();
        src.child("polywog/polywog.h").write_str("/* root */\n").unwrap();
        src.child("polywog/vec.h").write_str("/* vec */\n").unwrap();
        src.child("polywog/tests/internal.h").touch().unwrap();
        src.child("polywog/.swap.h").touch().unwrap();
        src
    }

    #[test]
    fn test_scenario_polywog_tree() {
        let src = polywog_tree();
        let out = TempDir::new().unwrap();

        let report = generate(src.path(), out.path()).unwrap();
        assert_eq!(report.output, out.path().join("polywog.h"));
        assert_eq!(report.headers, vec!["vec.h"]);

        let written = fs::read_to_string(&report.output).unwrap();
        assert_eq!(
            written,
            "// polywog.h -- automatically generated.\n\
             // This file is part of the polywog HPC library. See the license\n\
             // in the actual source files for details of distribution.\n\
             \n\
             #ifndef POLYWOG_LIBRARY_H\n\
             #define POLYWOG_LIBRARY_H\n\
             \n\
             #ifdef __cplusplus\n\
             extern \"C\" {\n\
             #endif\n\
             \n\
             #include \"polywog/polywog.h\"\n\
             #include \"polywog/vec.h\"\n\
             \n\
             #ifdef __cplusplus\n\
             }\n\
             #endif\n\
             \n\
             #endif\n\
             \n"
        );
    }

    #[test]
    fn test_idempotent_regeneration() {
        let src = polywog_tree();
        src.child("polywog/geom/point.h").touch().unwrap();
        src.child("polywog/geom/line.h").touch().unwrap();
        src.child("polywog/kernel.h").touch().unwrap();
        let out = TempDir::new().unwrap();

        let first = generate(src.path(), out.path()).unwrap();
        let first_bytes = fs::read(&first.output).unwrap();
        let second = generate(src.path(), out.path()).unwrap();
        let second_bytes = fs::read(&second.output).unwrap();

        assert_eq!(first_bytes, second_bytes);
        assert_eq!(first.headers, vec!["kernel.h", "vec.h", "line.h", "point.h"]);
    }

    #[test]
    fn test_self_header_never_reincluded() {
        let src = TempDir::new().unwrap();
        src.child("polywog/polywog.h").touch().unwrap();
        src.child("polywog/nested/polywog.h").touch().unwrap();
        let out = TempDir::new().unwrap();

        let report = generate(src.path(), out.path()).unwrap();
        let written = fs::read_to_string(&report.output).unwrap();

        assert!(report.headers.is_empty());
        assert_eq!(include_lines(&written), vec!["#include \"polywog/polywog.h\""]);
    }

    #[test]
    fn test_deeply_nested_tests_dir_is_skipped() {
        let src = TempDir::new().unwrap();
        src.child("polywog/a/b/c/tests/deep.h").touch().unwrap();
        src.child("polywog/a/b/c/kept.h").touch().unwrap();
        src.child("polywog/tests/more/shallow.h").touch().unwrap();
        let out = TempDir::new().unwrap();

        let report = generate(src.path(), out.path()).unwrap();
        let written = fs::read_to_string(&report.output).unwrap();

        assert_eq!(report.headers, vec!["kept.h"]);
        assert!(!written.contains("deep.h"));
        assert!(!written.contains("shallow.h"));
    }

    #[test]
    fn test_hidden_and_non_header_files_excluded() {
        let src = TempDir::new().unwrap();
        src.child("polywog/.hidden.h").touch().unwrap();
        src.child("polywog/readme.md").write_str("# polywog\n").unwrap();
        src.child("polywog/solver.c").touch().unwrap();
        src.child("polywog/solver.h").touch().unwrap();
        let out = TempDir::new().unwrap();

        let report = generate(src.path(), out.path()).unwrap();
        let written = fs::read_to_string(&report.output).unwrap();

        assert_eq!(
            include_lines(&written),
            vec![
                "#include \"polywog/polywog.h\"",
                "#include \"polywog/solver.h\"",
            ]
        );
        assert!(!written.contains(".hidden.h"));
        assert!(!written.contains("readme.md"));
    }

    #[test]
    fn test_target_directory_is_created() {
        let src = polywog_tree();
        let out = TempDir::new().unwrap();
        let target = out.child("build/include/generated");

        let report = generate(src.path(), target.path()).unwrap();

        assert!(target.path().is_dir());
        assert!(report.output.is_file());
    }

    #[test]
    fn test_existing_header_is_replaced() {
        let src = polywog_tree();
        let out = TempDir::new().unwrap();
        out.child("polywog.h").write_str("#error stale\n").unwrap();

        let report = generate(src.path(), out.path()).unwrap();
        let written = fs::read_to_string(&report.output).unwrap();
        assert!(!written.contains("#error stale"));
    }

    #[test]
    fn test_missing_library_directory_fails() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let err = generate(src.path(), out.path()).unwrap_err();
        assert!(matches!(err, UmbrellaError::SourceDirectory { .. }));
        assert!(!out.child("polywog.h").path().exists());
    }

    #[test]
    fn test_target_blocked_by_file_fails() {
        let src = polywog_tree();
        let out = TempDir::new().unwrap();
        out.child("blocker").write_str("not a dir").unwrap();

        let err = generate(src.path(), &out.path().join("blocker/include")).unwrap_err();
        assert!(matches!(err, UmbrellaError::TargetDirectory { .. }));
    }

    #[test]
    fn test_other_library_name() {
        let src = TempDir::new().unwrap();
        src.child("mesh/mesh.h").touch().unwrap();
        src.child("mesh/cell.h").touch().unwrap();
        let out = TempDir::new().unwrap();

        let generator = Generator::new(GeneratorConfig::for_library("mesh")).unwrap();
        let report = generator.generate(src.path(), out.path()).unwrap();
        let written = fs::read_to_string(&report.output).unwrap();

        assert_eq!(report.output, out.path().join("mesh.h"));
        assert!(written.starts_with("// mesh.h -- automatically generated.\n"));
        assert!(written.contains("#ifndef MESH_LIBRARY_H\n#define MESH_LIBRARY_H\n"));
        assert_eq!(
            include_lines(&written),
            vec!["#include \"mesh/mesh.h\"", "#include \"mesh/cell.h\""]
        );
    }

    #[test]
    fn test_config_file_drives_generation() {
        let src = TempDir::new().unwrap();
        src.child("mesh/a.hpp").touch().unwrap();
        src.child("mesh/b.h").touch().unwrap();
        src.child("mesh/detail/c.hpp").touch().unwrap();
        let cfg = TempDir::new().unwrap();
        cfg.child("umbrella.toml")
            .write_str(
                "library = \"mesh\"\n\
                 extension = \"hpp\"\n\
                 exclude_dirs = [\"detail\"]\n\
                 order = \"filesystem\"\n\
                 atomic_write = false\n",
            )
            .unwrap();
        let out = TempDir::new().unwrap();

        let config = GeneratorConfig::from_file(cfg.child("umbrella.toml").path()).unwrap();
        assert_eq!(config.order, TraversalOrder::Filesystem);

        let report = Generator::new(config)
            .unwrap()
            .generate(src.path(), out.path())
            .unwrap();
        assert_eq!(report.headers, vec!["a.hpp"]);
    }

    #[test]
    fn test_custom_template_from_config() {
        let src = polywog_tree();
        let cfg = TempDir::new().unwrap();
        cfg.child("list.tera")
            .write_str("{% for h in headers %}{{ h }}\n{% endfor %}")
            .unwrap();
        cfg.child("umbrella.toml")
            .write_str("template = \"list.tera\"\n")
            .unwrap();
        let out = TempDir::new().unwrap();

        let config = GeneratorConfig::from_file(cfg.child("umbrella.toml").path()).unwrap();
        let report = Generator::new(config)
            .unwrap()
            .generate(src.path(), out.path())
            .unwrap();

        assert_eq!(fs::read_to_string(&report.output).unwrap(), "vec.h\n");
    }

    #[test]
    fn test_misspelled_config_key_stops_generation() {
        let mut cfg = NamedTempFile::new().unwrap();
        writeln!(cfg, "exclude_dir = [\"detail\"]").unwrap();

        let err = GeneratorConfig::from_file(cfg.path()).unwrap_err();
        assert!(matches!(err, UmbrellaError::Config { .. }));
    }

    #[test]
    fn test_config_from_named_temp_file() {
        let src = TempDir::new().unwrap();
        src.child("mesh/mesh.h").touch().unwrap();
        src.child("mesh/tests/fixture.h").touch().unwrap();
        src.child("mesh/detail/impl.h").touch().unwrap();
        let out = TempDir::new().unwrap();

        let mut cfg = NamedTempFile::new().unwrap();
        writeln!(cfg, "library = \"mesh\"\nexclude_dirs = [\"detail\"]").unwrap();

        let config = GeneratorConfig::from_file(cfg.path()).unwrap();
        let report = Generator::new(config)
            .unwrap()
            .generate(src.path(), out.path())
            .unwrap();

        // Replacing the exclusion list re-admits `tests`.
        assert_eq!(report.headers, vec!["fixture.h"]);
    }
}
