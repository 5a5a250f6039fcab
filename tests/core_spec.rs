use std::collections::BTreeSet;
use std::fs;

use proptest::prelude::*;
use speculate2::speculate;
use studio_bridge::error::BridgeError;
use studio_bridge::models::*;
use studio_bridge::tree;
use tempfile::TempDir;

fn record(container: &str, folders: &[&str], name: &str, kind: ScriptKind, source: &str) -> ScriptRecord {
    ScriptRecord {
        container: container.to_string(),
        folder_path: folders.iter().map(|s| s.to_string()).collect(),
        name: name.to_string(),
        kind,
        source: source.to_string(),
    }
}

fn sample_batch() -> Vec<ScriptRecord> {
    vec![
        record("ServerScriptService", &[], "Main", ScriptKind::Server, "print('main')\n"),
        record("ServerScriptService", &["Systems", "Combat"], "Damage", ScriptKind::Module, "return {}"),
        record("StarterPlayer", &["StarterPlayerScripts"], "Camera", ScriptKind::Client, ""),
        record("ReplicatedStorage", &["Shared"], "Util", ScriptKind::Module, "-- util"),
        record("Workspace", &["Map", "Doors"], "Door", ScriptKind::Server, "local door = script.Parent"),
    ]
}

fn identity(container: &str, folders: &[String], name: &str, kind: ScriptKind) -> (String, Vec<String>, String, ScriptKind) {
    (container.to_string(), folders.to_vec(), name.to_string(), kind)
}

speculate! {
    before {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().join("MyGame").join("src");
    }

    describe "round trip" {
        it "scans back every exported identity" {
            let batch = sample_batch();
            let report = tree::export_all(&root, batch.iter().cloned().map(Ok));
            assert_eq!(report.exported, batch.len());

            let manifest = tree::scan(&root).expect("scan failed");
            assert_eq!(manifest.skipped, 0);

            let exported: BTreeSet<_> = batch
                .iter()
                .map(|r| identity(&r.container, &r.folder_path, &r.name, r.kind))
                .collect();
            let scanned: BTreeSet<_> = manifest
                .entries
                .iter()
                .map(|e| identity(&e.container, &e.folder_path, &e.name, e.kind))
                .collect();
            assert_eq!(exported, scanned);
        }

        it "hands out file handles that read back the exported source" {
            let batch = sample_batch();
            tree::export_all(&root, batch.iter().cloned().map(Ok));

            for entry in tree::scan(&root).expect("scan failed").entries {
                let original = batch
                    .iter()
                    .find(|r| r.name == entry.name)
                    .expect("unknown entry");
                let text = tree::read_file(&root, &entry.relative_file).expect("read failed");
                assert_eq!(text, original.source);
            }
        }
    }

    describe "export" {
        it "is idempotent" {
            let first = tree::export_all(&root, sample_batch().into_iter().map(Ok));
            let path = root.join("ServerScriptService/Systems/Combat/Damage.luau");
            let before = fs::read(&path).expect("missing file");

            let second = tree::export_all(&root, sample_batch().into_iter().map(Ok));

            assert_eq!(first, second);
            assert_eq!(fs::read(&path).expect("missing file"), before);
        }

        it "skips a record with an empty name and keeps the rest" {
            let items = vec![
                Ok(record("Workspace", &[], "A", ScriptKind::Server, "a")),
                Ok(record("Workspace", &[], "", ScriptKind::Server, "b")),
                Ok(record("Workspace", &[], "C", ScriptKind::Client, "c")),
            ];

            let report = tree::export_all(&root, items);

            assert_eq!(report.exported, 2);
            assert_eq!(report.skipped, 1);
            assert_eq!(report.errors.len(), 1);
            assert!(report.errors[0].starts_with("scripts[1]:"));
        }

        it "names files after the script kind" {
            tree::export_all(&root, vec![
                Ok(record("Workspace", &[], "Foo", ScriptKind::Server, "")),
                Ok(record("Workspace", &["c"], "Foo", ScriptKind::Client, "")),
                Ok(record("Workspace", &["m"], "Foo", ScriptKind::Module, "")),
            ]);

            assert!(root.join("Workspace/Foo.server.luau").is_file());
            assert!(root.join("Workspace/c/Foo.client.luau").is_file());
            assert!(root.join("Workspace/m/Foo.luau").is_file());
        }

        it "refuses module names that would collide with another kind" {
            let report = tree::export_all(&root, vec![
                Ok(record("Workspace", &[], "Foo", ScriptKind::Server, "server")),
                Ok(record("Workspace", &[], "Foo.server", ScriptKind::Module, "module")),
                Ok(record("Workspace", &[], "Foo.client", ScriptKind::Module, "module")),
            ]);

            assert_eq!(report.exported, 1);
            assert_eq!(report.skipped, 2);
            assert_eq!(report.errors[0], "scripts[1]: name is ambiguous with a script suffix");
            assert_eq!(
                fs::read_to_string(root.join("Workspace/Foo.server.luau")).expect("missing file"),
                "server"
            );

            let manifest = tree::scan(&root).expect("scan failed");
            assert_eq!(manifest.entries.len(), 1);
            assert_eq!(manifest.entries[0].name, "Foo");
            assert_eq!(manifest.entries[0].kind, ScriptKind::Server);
        }

        it "never writes outside the source root" {
            let report = tree::export_all(&root, vec![
                Ok(record("..", &[], "Escape", ScriptKind::Module, "x")),
                Ok(record("Workspace", &["..", ".."], "Escape", ScriptKind::Module, "x")),
                Ok(record("Workspace", &[], "../Escape", ScriptKind::Module, "x")),
            ]);

            assert_eq!(report.exported, 0);
            assert_eq!(report.skipped, 3);
            assert!(!dir.path().join("MyGame/Escape.luau").exists());
            assert!(!dir.path().join("Escape.luau").exists());
        }
    }

    describe "scan" {
        it "returns an empty manifest for an empty root" {
            fs::create_dir_all(&root).expect("mkdir failed");

            let manifest = tree::scan(&root).expect("scan failed");

            assert!(manifest.entries.is_empty());
        }

        it "fails with RootNotFound for a missing root" {
            let result = tree::scan(&root);

            assert!(matches!(result, Err(BridgeError::RootNotFound { .. })));
        }

        it "leaves out files with unrecognized suffixes" {
            fs::create_dir_all(root.join("Workspace")).expect("mkdir failed");
            fs::write(root.join("Workspace/Bar.module.txt"), "").expect("write failed");
            fs::write(root.join("Workspace/Baz.lua"), "").expect("write failed");

            let manifest = tree::scan(&root).expect("scan failed");

            assert!(manifest.entries.is_empty());
            assert_eq!(manifest.skipped, 0);
        }
    }

    describe "read_file" {
        it "rejects traversal without reading" {
            fs::create_dir_all(&root).expect("mkdir failed");
            fs::write(dir.path().join("passwd"), "secret").expect("write failed");

            let result = tree::read_file(&root, "../../passwd");
            assert!(matches!(result, Err(BridgeError::PathEscape(_))));

            let result = tree::read_file(&root, "../../etc/passwd");
            assert!(matches!(result, Err(BridgeError::PathEscape(_))));
        }
    }
}

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9_ .-]{1,10}",
        "[A-Za-z]{1,4}\\.(server|client|luau)",
        Just("...".to_string()),
    ]
}

fn script_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9_ .-]{1,10}",
        "[A-Za-z]{1,4}\\.(server|client|luau)(\\.server|\\.client)?",
        "\\.(server|client)",
    ]
}

fn kind() -> impl Strategy<Value = ScriptKind> {
    prop_oneof![
        Just(ScriptKind::Server),
        Just(ScriptKind::Client),
        Just(ScriptKind::Module),
    ]
}

proptest! {
    #[test]
    fn every_accepted_record_scans_back_to_its_identity(
        container in segment(),
        folders in prop::collection::vec(segment(), 0..3),
        name in script_name(),
        kind in kind(),
    ) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().join("src");
        let folders: Vec<&str> = folders.iter().map(String::as_str).collect();
        let script = record(&container, &folders, &name, kind, "-- body");

        let report = tree::export_all(&root, vec![Ok(script)]);
        let manifest = tree::scan(&root);

        if report.exported == 0 {
            // Refused records must leave no script behind.
            prop_assert_eq!(report.skipped, 1);
            let entries = manifest.map(|m| m.entries).unwrap_or_default();
            prop_assert!(entries.is_empty());
            return Ok(());
        }

        let manifest = manifest.expect("scan failed");
        prop_assert_eq!(manifest.skipped, 0);
        prop_assert_eq!(manifest.entries.len(), 1);

        let entry = &manifest.entries[0];
        let expected_folders: Vec<String> =
            folders.iter().map(|f| f.trim().to_string()).collect();
        prop_assert_eq!(entry.container.as_str(), container.trim());
        prop_assert_eq!(&entry.folder_path, &expected_folders);
        prop_assert_eq!(entry.name.as_str(), name.trim());
        prop_assert_eq!(entry.kind, kind);

        let text = tree::read_file(&root, &entry.relative_file).expect("read failed");
        prop_assert_eq!(text, "-- body");
    }
}
