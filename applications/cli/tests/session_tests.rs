//! End-to-end tests for the headless player session
//!
//! A simulated media clock plays through real queues so the store, the
//! surface and the element's event ordering are exercised together.

use sound_cli::session::render_controls;
use sound_cli::{AppError, Command, HomePage, Session, SimulatedMedia};
use sound_core::{Episode, EpisodeId};
use sound_playback::{Controls, PlaybackError, PlayerConfig, PlayerStore};
use std::time::Duration;

// =============================================================================
// Helpers
// =============================================================================

fn create_test_episode(id: &str, duration: u64) -> Episode {
    Episode::new(
        id,
        format!("Episode {}", id),
        "Host",
        "https://example.com/thumb.jpg",
        format!("https://cdn.example.com/{}.m4a", id),
        duration,
        "8 jan 21",
    )
}

fn create_session(episodes: &[Episode], config: PlayerConfig) -> Session {
    Session::new(
        PlayerStore::new(config),
        SimulatedMedia::for_episodes(episodes),
    )
}

fn create_test_queue(len: usize, duration: u64) -> Vec<Episode> {
    (0..len)
        .map(|i| create_test_episode(&format!("ep{}", i), duration))
        .collect()
}

fn playing_session(len: usize, start: usize) -> Session {
    let queue = create_test_queue(len, 120);
    let mut session = create_session(&queue, PlayerConfig::seeded(9));
    session.update(|store| store.play_list(queue, start)).unwrap();
    session
}

fn ids(ids: &[&str]) -> Vec<EpisodeId> {
    ids.iter().map(|id| EpisodeId::new(*id)).collect()
}

// =============================================================================
// Sequential Playback
// =============================================================================

mod sequential {
    use super::*;

    #[test]
    fn plays_queue_to_the_end() {
        let queue = vec![
            create_test_episode("a", 30),
            create_test_episode("b", 20),
            create_test_episode("c", 10),
        ];
        let mut session = create_session(&queue, PlayerConfig::default());

        session.update(|store| store.play_list(queue.clone(), 0)).unwrap();
        assert_eq!(
            session.surface().media().loaded(),
            Some("https://cdn.example.com/a.m4a")
        );
        assert!(session.surface().media().is_playing());

        let steps = session.run_to_end(Duration::from_secs(5), 1_000);

        // 6 + 4 + 2 ticks of five seconds
        assert_eq!(steps, 12);
        assert!(!session.is_active());
        assert_eq!(session.episodes_played(), 3);
        assert!(session.surface().media().loaded().is_none());
    }

    #[test]
    fn progress_tracks_media_clock() {
        let queue = vec![create_test_episode("a", 120)];
        let mut session = create_session(&queue, PlayerConfig::default());
        session.update(|store| store.play_list(queue.clone(), 0)).unwrap();

        session.step(Duration::from_millis(1_500));
        session.step(Duration::from_millis(1_500));

        assert_eq!(session.surface().progress(), 3);
        assert_eq!(session.surface().progress_label(), "00:00:03");
    }

    #[test]
    fn advancing_moves_to_next_episode() {
        let queue = vec![create_test_episode("a", 10), create_test_episode("b", 10)];
        let mut session = create_session(&queue, PlayerConfig::default());
        session.update(|store| store.play_list(queue.clone(), 0)).unwrap();

        session.step(Duration::from_secs(10));

        assert_eq!(session.store().current_index(), Some(1));
        assert!(session.store().is_playing());
        assert_eq!(session.surface().progress(), 0);
        assert_eq!(
            session.surface().media().loaded(),
            Some("https://cdn.example.com/b.m4a")
        );
        assert!(session.surface().media().is_playing());
    }

    #[test]
    fn pause_stops_the_clock() {
        let queue = vec![create_test_episode("a", 60)];
        let mut session = create_session(&queue, PlayerConfig::default());
        session.update(|store| store.play_list(queue.clone(), 0)).unwrap();
        session.step(Duration::from_secs(5));

        session.update(|store| store.toggle_play());
        assert!(!session.store().is_playing());
        assert!(!session.surface().media().is_playing());

        session.step(Duration::from_secs(30));
        assert_eq!(session.surface().media().position(), Duration::from_secs(5));

        session.update(|store| store.toggle_play());
        session.step(Duration::from_secs(5));
        assert_eq!(session.surface().progress(), 10);
    }
}

// =============================================================================
// Loop and Shuffle
// =============================================================================

mod modes {
    use super::*;

    #[test]
    fn looping_never_finishes() {
        let queue = vec![create_test_episode("a", 10)];
        let config = PlayerConfig {
            looping: true,
            ..PlayerConfig::default()
        };
        let mut session = create_session(&queue, config);
        session.update(|store| store.play_list(queue.clone(), 0)).unwrap();

        let steps = session.run_to_end(Duration::from_secs(5), 50);

        assert_eq!(steps, 50);
        assert!(session.is_active());
        assert_eq!(session.store().current_index(), Some(0));
        assert_eq!(session.episodes_played(), 1);
    }

    #[test]
    fn shuffle_keeps_playing_from_the_queue() {
        let queue: Vec<Episode> = (0..4)
            .map(|i| create_test_episode(&format!("ep{}", i), 10))
            .collect();
        let config = PlayerConfig {
            shuffle: true,
            seed: Some(17),
            ..PlayerConfig::default()
        };
        let mut session = create_session(&queue, config);
        session.update(|store| store.play_list(queue.clone(), 0)).unwrap();

        let steps = session.run_to_end(Duration::from_secs(10), 25);

        // Shuffle always has a next episode
        assert_eq!(steps, 25);
        assert!(session.is_active());
        assert!(session.store().current_index().unwrap() < 4);
        assert!(session.surface().media().is_playing());
        assert!(session.episodes_played() > 1);
    }

    #[test]
    fn turning_shuffle_off_lets_queue_finish() {
        let queue: Vec<Episode> = (0..3)
            .map(|i| create_test_episode(&format!("ep{}", i), 10))
            .collect();
        let config = PlayerConfig {
            shuffle: true,
            seed: Some(3),
            ..PlayerConfig::default()
        };
        let mut session = create_session(&queue, config);
        session.update(|store| store.play_list(queue.clone(), 0)).unwrap();
        session.run_to_end(Duration::from_secs(10), 5);

        session.update(|store| store.toggle_shuffle());
        let steps = session.run_to_end(Duration::from_secs(10), 100);

        assert!(steps <= 3);
        assert!(!session.is_active());
    }
}

// =============================================================================
// Home Page Integration
// =============================================================================

mod home_page {
    use super::*;

    #[test]
    fn table_row_plays_rest_of_listing() {
        let listing: Vec<Episode> = (0..5)
            .map(|i| create_test_episode(&format!("ep{}", i), 10))
            .collect();
        let page = HomePage::from_episodes(listing);
        let queue = page.queue();
        let mut session = create_session(&queue, PlayerConfig::default());

        session
            .update(|store| page.play_from_all(store, 1))
            .unwrap();
        assert_eq!(session.store().current_index(), Some(3));

        session.run_to_end(Duration::from_secs(10), 100);

        // ep3 and ep4 only
        assert_eq!(session.episodes_played(), 2);
        assert!(!session.is_active());
    }
}

// =============================================================================
// Played History
// =============================================================================

mod history {
    use super::*;

    #[test]
    fn records_episodes_in_order() {
        let queue = create_test_queue(3, 10);
        let mut session = create_session(&queue, PlayerConfig::default());
        session.update(|store| store.play_list(queue.clone(), 0)).unwrap();

        session.run_to_end(Duration::from_secs(10), 10);

        assert_eq!(session.played(), ids(&["ep0", "ep1", "ep2"]).as_slice());
    }

    #[test]
    fn records_episode_cleared_in_same_update() {
        let queue = create_test_queue(2, 10);
        let mut session = create_session(&queue, PlayerConfig::default());

        session.update(|store| {
            store.play_list(queue.clone(), 1).unwrap();
            store.clear_player_state();
        });

        assert_eq!(session.played(), ids(&["ep1"]).as_slice());
        assert!(!session.is_active());
    }
}

// =============================================================================
// Command Parsing
// =============================================================================

mod commands {
    use super::*;

    #[test]
    fn parses_button_shortcuts() {
        assert_eq!("p".parse::<Command>().unwrap(), Command::TogglePlay);
        assert_eq!("pause".parse::<Command>().unwrap(), Command::TogglePlay);
        assert_eq!(" N ".parse::<Command>().unwrap(), Command::Next);
        assert_eq!("b".parse::<Command>().unwrap(), Command::Previous);
        assert_eq!("previous".parse::<Command>().unwrap(), Command::Previous);
        assert_eq!("s".parse::<Command>().unwrap(), Command::ToggleShuffle);
        assert_eq!("l".parse::<Command>().unwrap(), Command::ToggleLoop);
        assert_eq!("i".parse::<Command>().unwrap(), Command::Status);
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn parses_seek_positions() {
        assert_eq!("seek 75".parse::<Command>().unwrap(), Command::Seek(75));
        assert_eq!("seek 1.9".parse::<Command>().unwrap(), Command::Seek(1));
        assert_eq!(
            "seek 00:01:15".parse::<Command>().unwrap(),
            Command::Seek(75)
        );
        assert_eq!(
            "SEEK 01:06:21".parse::<Command>().unwrap(),
            Command::Seek(3981)
        );
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["seek", "seek soon", "seek 1:2", "seek -5", "n 2", "dance", "p p p"] {
            assert!(
                matches!(input.parse::<Command>(), Err(AppError::InvalidCommand(_))),
                "{:?} should be rejected",
                input
            );
        }
    }
}

// =============================================================================
// Player Controls
// =============================================================================

mod controls {
    use super::*;

    #[test]
    fn toggle_play_pauses_media() {
        let mut session = playing_session(3, 0);

        session.apply(Command::TogglePlay).unwrap();
        assert!(!session.store().is_playing());
        assert!(!session.surface().media().is_playing());

        session.apply(Command::TogglePlay).unwrap();
        assert!(session.surface().media().is_playing());
    }

    #[test]
    fn next_and_previous_move_through_queue() {
        let mut session = playing_session(3, 0);

        session.apply(Command::Next).unwrap();
        assert_eq!(session.store().current_index(), Some(1));
        assert_eq!(
            session.surface().media().loaded(),
            Some("https://cdn.example.com/ep1.m4a")
        );

        session.apply(Command::Previous).unwrap();
        assert_eq!(session.store().current_index(), Some(0));
        assert_eq!(session.played(), ids(&["ep0", "ep1", "ep0"]).as_slice());
    }

    #[test]
    fn disabled_buttons_are_ignored() {
        let mut session = playing_session(3, 0);
        session.apply(Command::Previous).unwrap();
        assert_eq!(session.store().current_index(), Some(0));

        let mut session = playing_session(3, 2);
        session.apply(Command::Next).unwrap();
        assert_eq!(session.store().current_index(), Some(2));
        assert_eq!(session.episodes_played(), 1);

        let mut session = playing_session(1, 0);
        session.apply(Command::ToggleShuffle).unwrap();
        assert!(!session.store().is_shuffling());
    }

    #[test]
    fn toggles_flip_modes() {
        let mut session = playing_session(3, 0);

        session.apply(Command::ToggleShuffle).unwrap();
        session.apply(Command::ToggleLoop).unwrap();

        assert!(session.store().is_shuffling());
        assert!(session.store().is_looping());
    }

    #[test]
    fn seek_moves_media_and_progress() {
        let mut session = playing_session(2, 0);

        session.apply(Command::Seek(75)).unwrap();
        assert_eq!(session.surface().progress(), 75);
        assert_eq!(session.surface().media().position(), Duration::from_secs(75));

        session.apply(Command::Seek(10_000)).unwrap();
        assert_eq!(session.surface().progress(), 120);
    }

    #[test]
    fn seek_without_episode_fails() {
        let mut session = create_session(&[], PlayerConfig::default());

        let result = session.apply(Command::Seek(5));
        assert!(matches!(
            result,
            Err(AppError::Playback(PlaybackError::NoEpisodeLoaded))
        ));
    }

    #[test]
    fn quit_clears_player() {
        let mut session = playing_session(3, 1);

        session.apply(Command::Quit).unwrap();

        assert!(!session.is_active());
        assert!(session.surface().media().loaded().is_none());
    }

    #[test]
    fn handle_input_skips_blank_lines() {
        let mut session = playing_session(2, 0);

        session.handle_input("   ").unwrap();
        assert_eq!(session.store().current_index(), Some(0));

        session.handle_input("n").unwrap();
        assert_eq!(session.store().current_index(), Some(1));

        assert!(session.handle_input("jump").is_err());
    }
}

// =============================================================================
// Status Line
// =============================================================================

mod status {
    use super::*;

    #[test]
    fn empty_player_shows_disabled_buttons() {
        assert_eq!(
            render_controls(&Controls::default()),
            "(shuffle) (prev) (play) (next) (loop)"
        );

        let session = create_session(&[], PlayerConfig::default());
        assert_eq!(
            session.status_line(),
            "Nothing playing [00:00:00 / 00:00:00] (shuffle) (prev) (play) (next) (loop)"
        );
    }

    #[test]
    fn shows_progress_and_button_state() {
        let mut session = playing_session(3, 0);
        session.step(Duration::from_secs(65));

        assert_eq!(
            session.status_line(),
            "Episode ep0 [00:01:05 / 00:02:00] shuffle (prev) pause next loop"
        );

        session.apply(Command::TogglePlay).unwrap();
        session.apply(Command::ToggleShuffle).unwrap();
        session.apply(Command::ToggleLoop).unwrap();

        assert_eq!(
            session.status_line(),
            "Episode ep0 [00:01:05 / 00:02:00] [shuffle] prev play next [loop]"
        );
    }
}

// =============================================================================
// Interactive Run
// =============================================================================

mod interactive {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn commands_drive_playback_until_quit() {
        let mut session = playing_session(3, 0);

        let input: &[u8] = b"n\nbogus\n\nn\nq\n";
        session.run(input, Duration::from_millis(250), 1.0).await;

        assert!(!session.is_active());
        assert_eq!(session.played(), ids(&["ep0", "ep1", "ep2"]).as_slice());
    }

    #[tokio::test(start_paused = true)]
    async fn playback_continues_after_input_ends() {
        let queue = create_test_queue(2, 1);
        let mut session = create_session(&queue, PlayerConfig::default());
        session.update(|store| store.play_list(queue.clone(), 0)).unwrap();

        let input: &[u8] = b"";
        session.run(input, Duration::from_millis(250), 1.0).await;

        assert!(!session.is_active());
        assert_eq!(session.played(), ids(&["ep0", "ep1"]).as_slice());
    }
}
