#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::tempdir;

    use crate::highscore::{HIGH_SCORE_FILE, HighScore, MEMORY_HIGH_SCORE_FILE, default_path};

    #[test]
    fn test_missing_file_reads_zero() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("missing.txt");
        let high_score = HighScore::load(&path);
        assert_eq!(high_score.best(), 0);
        assert_eq!(high_score.path(), path);
        assert!(!path.exists());
    }

    #[test]
    fn test_garbage_file_reads_zero() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("highscore.txt");
        fs::write(&path, "not a number").expect("Failed to write file");

        assert_eq!(HighScore::load(&path).best(), 0);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("highscore.txt");
        fs::write(&path, "  4200\n").expect("Failed to write file");

        assert_eq!(HighScore::load(&path).best(), 4200);
    }

    #[test]
    fn test_submit_saves_only_improvements() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("nested").join("highscore.txt");

        let mut high_score = HighScore::load(&path);
        assert!(high_score.submit(1500));
        assert!(!high_score.submit(1500));
        assert!(!high_score.submit(200));
        assert_eq!(high_score.best(), 1500);

        let reloaded = HighScore::load(&path);
        assert_eq!(reloaded.best(), 1500);
        assert_eq!(
            fs::read_to_string(&path).expect("Failed to read file"),
            "1500"
        );
    }

    #[test]
    fn test_unwritable_path_keeps_score_in_memory() {
        let dir = tempdir().expect("Failed to create temp directory");
        // A directory where the file should be makes the write fail
        let path = dir.path().join("taken");
        fs::create_dir(&path).expect("Failed to create directory");

        let mut high_score = HighScore::load(&path);
        assert!(high_score.submit(300));
        assert_eq!(high_score.best(), 300);
    }

    #[test]
    fn test_default_path_override() {
        let custom = Path::new("/tmp/custom-score.txt");
        assert_eq!(default_path(Some(custom), HIGH_SCORE_FILE), custom);
        assert!(default_path(None, HIGH_SCORE_FILE).ends_with("highscore.txt"));
        assert!(default_path(None, MEMORY_HIGH_SCORE_FILE).ends_with("memory_highscore.txt"));
    }
}
