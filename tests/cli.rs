use std::fs;

use tilepool::cli::Command;
use tilepool::parser::{load_from_json, read_compressed};
use tilepool::{GameMap, execute};

#[test]
fn compress_then_decompress_files() {
    let dir = tempfile::tempdir().unwrap();
    let packed = dir.path().join("town.packed.json");
    let unpacked = dir.path().join("town.raw.json");

    execute(Command::Compress {
        maps_dir: "tests/maps".into(),
        id: "town".into(),
        output: packed.clone(),
        pretty: false,
    })
    .unwrap();

    let compressed = read_compressed(&packed).unwrap();
    assert_eq!(compressed.id(), "town");
    assert_eq!(compressed.tiles().len(), 12);

    execute(Command::Decompress {
        input: packed.clone(),
        output: unpacked.clone(),
        pretty: true,
    })
    .unwrap();

    let original = load_from_json(&fs::read_to_string("tests/maps/town.json").unwrap()).unwrap();
    let restored = load_from_json(&fs::read_to_string(&unpacked).unwrap()).unwrap();
    assert_eq!(restored, original);

    execute(Command::Inspect { input: packed }).unwrap();
}

#[test]
fn compress_unknown_map_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = execute(Command::Compress {
        maps_dir: "tests/maps".into(),
        id: "nowhere".into(),
        output: dir.path().join("out.json"),
        pretty: false,
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("nowhere.json"), "{err:#}");
}
