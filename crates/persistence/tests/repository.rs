//! File repository: atomic saves, backups and fallback loads.

use std::fs;

use game_core::state::{Character, Creature, Game, PlayerCharacter};
use persistence::{
    DecodeError, FileSaveRepository, LoadedFrom, RepositoryError, SaveBundle, SaveRepository,
};

fn bundle(gold: f64) -> SaveBundle {
    let identity = Character {
        id: "player-1".into(),
        ..Character::default()
    };
    let mut player = PlayerCharacter::new(identity, Creature::fresh("", "", 100.0, 20.0, 30.0));
    player.gold = gold;
    SaveBundle::new(Game::default(), player)
}

#[test]
fn second_save_rotates_the_first_into_backup() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();

    repo.save("main", &bundle(10.0)).unwrap();
    assert!(!dir.path().join("main.sav.bak").exists());

    repo.save("main", &bundle(20.0)).unwrap();
    assert!(dir.path().join("main.sav.bak").exists());
    assert!(!dir.path().join("main.sav.tmp").exists());

    assert_eq!(repo.load("main").unwrap().unwrap().player.gold, 20.0);
    assert_eq!(repo.list_slots().unwrap(), vec!["main".to_string()]);
}

#[test]
fn corrupted_primary_falls_back_to_backup() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    repo.save("main", &bundle(10.0)).unwrap();
    repo.save("main", &bundle(20.0)).unwrap();

    let primary = dir.path().join("main.sav");
    let mut bytes = fs::read(&primary).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x55;
    fs::write(&primary, bytes).unwrap();

    assert!(matches!(
        repo.load("main"),
        Err(RepositoryError::MalformedSaveData(DecodeError::ChecksumMismatch { .. }))
    ));

    let (loaded, from) = repo.load_with_fallback("main").unwrap().unwrap();
    assert_eq!(from, LoadedFrom::Backup);
    assert_eq!(loaded.player.gold, 10.0);
}

#[test]
fn corrupted_primary_never_replaces_a_good_backup() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    repo.save("main", &bundle(10.0)).unwrap();
    repo.save("main", &bundle(20.0)).unwrap();

    fs::write(dir.path().join("main.sav"), b"garbage").unwrap();
    repo.save("main", &bundle(30.0)).unwrap();

    // The backup still holds the last copy that verified before the garbage
    let backup = fs::read(dir.path().join("main.sav.bak")).unwrap();
    assert_eq!(SaveBundle::open(&backup).unwrap().player.gold, 10.0);
}

#[test]
fn both_copies_bad_reports_the_primary_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    fs::write(dir.path().join("main.sav"), b"nope").unwrap();
    fs::write(dir.path().join("main.sav.bak"), b"DSAV").unwrap();

    assert!(matches!(
        repo.load_with_fallback("main"),
        Err(RepositoryError::MalformedSaveData(DecodeError::BadMagic))
    ));
}

#[test]
fn delete_removes_primary_and_backup() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    repo.save("main", &bundle(1.0)).unwrap();
    repo.save("main", &bundle(2.0)).unwrap();

    repo.delete("main").unwrap();
    assert!(!repo.exists("main"));
    assert!(!dir.path().join("main.sav.bak").exists());
    assert!(repo.list_slots().unwrap().is_empty());
}
