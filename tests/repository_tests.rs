// tests/repository_tests.rs
mod common;

use common::{registry_at, sample_profile, AudioSettings, PlayerProfile, TestContext};
use savestate::{HandlerKind, RepositoryRegistry, StorageConfig, StorageError};

#[test_log::test]
fn test_profile_survives_new_registry() {
    let ctx = TestContext::obfuscated();
    let profiles = ctx.registry.register::<PlayerProfile>("profile");
    profiles
        .save(PlayerProfile {
            level: 5,
            ..Default::default()
        })
        .unwrap();

    let reopened = ctx.reopen();
    let profiles = reopened.register::<PlayerProfile>("profile");
    assert_eq!(profiles.get(), PlayerProfile::default());

    let loaded = profiles.load().unwrap();
    assert_eq!(loaded.level, 5);
    assert_eq!(profiles.get().level, 5);
}

#[test]
fn test_save_then_load_round_trips() {
    let ctx = TestContext::obfuscated();
    let profiles = ctx.registry.register::<PlayerProfile>("profile");

    profiles.save(sample_profile()).unwrap();
    assert_eq!(profiles.load().unwrap(), sample_profile());
}

#[test]
fn test_load_of_never_written_key_keeps_default() {
    let ctx = TestContext::obfuscated();
    let audio = ctx.registry.register::<AudioSettings>("audio");

    assert_eq!(audio.load().unwrap(), AudioSettings::default());
    assert_eq!(audio.get(), AudioSettings::default());
}

#[test]
fn test_later_registration_key_is_ignored() {
    let ctx = TestContext::obfuscated();
    ctx.registry.register::<PlayerProfile>("keyA");
    ctx.registry
        .register::<PlayerProfile>("keyB")
        .save(sample_profile())
        .unwrap();

    assert_eq!(
        ctx.registry.repository::<PlayerProfile>().unwrap().key(),
        "keyA"
    );

    // The write landed under keyA, never keyB.
    let reopened = ctx.reopen();
    assert!(reopened.handler().exists("keyA"));
    assert!(!reopened.handler().exists("keyB"));
}

#[test]
fn test_save_is_visible_before_reload() {
    let ctx = TestContext::obfuscated();
    let audio = ctx.registry.register::<AudioSettings>("audio");
    let quiet = AudioSettings {
        master: 0.1,
        muted: true,
    };

    audio.save(quiet.clone()).unwrap();
    assert_eq!(
        ctx.registry.repository::<AudioSettings>().unwrap().get(),
        quiet
    );
}

#[test]
fn test_corrupt_record_is_reported() {
    let ctx = TestContext::obfuscated();
    ctx.registry.handler().put("profile", "{\"level\":").unwrap();

    let profiles = ctx.registry.register::<PlayerProfile>("profile");
    assert!(matches!(
        profiles.load(),
        Err(StorageError::InvalidFormat(_))
    ));
    assert_eq!(profiles.get(), PlayerProfile::default());
}

#[test]
fn test_failed_write_keeps_optimistic_cache() {
    let temp_dir = tempfile::tempdir().unwrap();
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    let registry = registry_at(&blocker);
    let profiles = registry.register::<PlayerProfile>("profile");

    assert!(matches!(
        profiles.save(sample_profile()),
        Err(StorageError::IoError(_))
    ));
    assert_eq!(profiles.get(), sample_profile());

    // Reading the same unreachable location is a fault, not "never saved".
    assert!(matches!(profiles.load(), Err(StorageError::IoError(_))));
    assert_eq!(profiles.get(), sample_profile());
}

#[tokio::test]
async fn test_async_save_and_load() {
    let ctx = TestContext::obfuscated();
    let profiles = ctx.registry.register::<PlayerProfile>("profile");

    profiles.save_async(sample_profile()).await.unwrap();

    let reopened = ctx.reopen();
    let profiles = reopened.register::<PlayerProfile>("profile");
    assert_eq!(profiles.load_async().await.unwrap(), sample_profile());
}

#[test]
fn test_sync_and_async_share_records() {
    let ctx = TestContext::obfuscated();
    let profiles = ctx.registry.register::<PlayerProfile>("profile");

    tokio_test::block_on(profiles.save_async(sample_profile())).unwrap();
    assert_eq!(profiles.load().unwrap(), sample_profile());
}

#[test]
fn test_registry_from_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    for handler in [HandlerKind::Plain, HandlerKind::Obfuscated, HandlerKind::Sealed] {
        let config = StorageConfig {
            data_dir: temp_dir.path().join(format!("{handler:?}")),
            handler,
            passphrase: Some("passphrase".to_string()),
        };

        let registry = RepositoryRegistry::from_config(&config).unwrap();
        let profiles = registry.register::<PlayerProfile>("profile");
        profiles.save(sample_profile()).unwrap();

        let reopened = RepositoryRegistry::from_config(&config).unwrap();
        let loaded = reopened.register::<PlayerProfile>("profile").load().unwrap();
        assert_eq!(loaded, sample_profile());
    }
}

#[test]
fn test_sealed_config_without_passphrase_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        data_dir: temp_dir.path().to_path_buf(),
        handler: HandlerKind::Sealed,
        passphrase: None,
    };

    assert!(matches!(
        RepositoryRegistry::from_config(&config),
        Err(StorageError::InvalidSecret(_))
    ));
}
