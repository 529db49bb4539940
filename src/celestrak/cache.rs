use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::celestrak::download::Download;
use crate::celestrak::error::DatasetError;
use crate::celestrak::query::{DatasetFormat, Query};

pub const DEFAULT_BASE_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Missing,
    Fresh,
    Stale,
    /// Age could not be determined; the cached copy is served as is.
    Unknown,
}

impl Freshness {
    fn needs_download(&self) -> bool {
        matches!(self, Freshness::Missing | Freshness::Stale)
    }
}

/// Dataset files on disk, downloaded on demand.
pub struct DatasetCache<D> {
    folder: PathBuf,
    base_url: String,
    format: DatasetFormat,
    max_age: Duration,
    local_only: bool,
    downloader: D,
}

impl<D: Download> DatasetCache<D> {
    pub fn new(folder: PathBuf, downloader: D) -> Self {
        Self {
            folder,
            base_url: DEFAULT_BASE_URL.to_string(),
            format: DatasetFormat::default(),
            max_age: DEFAULT_MAX_AGE,
            local_only: false,
            downloader,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_format(mut self, format: DatasetFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_local_only(mut self, local_only: bool) -> Self {
        self.local_only = local_only;
        self
    }

    pub fn format(&self) -> DatasetFormat {
        self.format
    }

    pub fn path_for(&self, query: &Query) -> PathBuf {
        self.folder.join(query.file_name(self.format))
    }

    /// Return the cache path for `query`, downloading first if the copy is missing or stale.
    ///
    /// In local-only mode the path is returned without checking that it exists.
    pub async fn ensure(&self, query: &Query) -> Result<PathBuf, DatasetError> {
        let path = self.path_for(query);

        if self.local_only {
            log::debug!("Local-only mode, using {}", path.display());
            return Ok(path);
        }

        let freshness = freshness(&path, SystemTime::now(), self.max_age);
        log::debug!("{} is {:?}", path.display(), freshness);

        if freshness.needs_download() {
            log::info!(
                "Fetching {}={} from {} into {}",
                query.kind,
                query.value,
                self.base_url,
                path.display()
            );
            let body = self
                .downloader
                .get(&self.base_url, &query.query_pairs(self.format))
                .await?;
            write_atomically(&path, &body)?;
        }

        Ok(path)
    }
}

pub fn freshness(path: &Path, now: SystemTime, max_age: Duration) -> Freshness {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Freshness::Missing,
        Err(e) => {
            log::warn!("Cannot stat {}: {}", path.display(), e);
            return Freshness::Unknown;
        }
    };

    let modified = match metadata.modified() {
        Ok(m) => m,
        Err(e) => {
            log::warn!("No modification time for {}: {}", path.display(), e);
            return Freshness::Unknown;
        }
    };

    match now.duration_since(modified) {
        Ok(age) if age >= max_age => Freshness::Stale,
        Ok(_) => Freshness::Fresh,
        Err(_) => Freshness::Unknown,
    }
}

fn write_atomically(path: &Path, body: &[u8]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension(format!("{}.part", uuid::Uuid::new_v4()));
    fs::write(&tmp, body)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celestrak::QueryKind;
    use std::fs::File;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct CountingDownloader {
        calls: Arc<AtomicUsize>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl CountingDownloader {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Download for CountingDownloader {
        async fn get(&self, base_url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, DatasetError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let params: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            self.requests
                .lock()
                .unwrap()
                .push(format!("{} {}", base_url, params.join(" ")));
            Ok(b"[]".to_vec())
        }
    }

    struct FailingDownloader;

    impl Download for FailingDownloader {
        async fn get(&self, base_url: &str, _query: &[(&str, &str)]) -> Result<Vec<u8>, DatasetError> {
            Err(DatasetError::Status {
                url: base_url.to_string(),
                status: 503,
            })
        }
    }

    fn gnss() -> Query {
        Query::new(QueryKind::Group, "gnss").unwrap()
    }

    fn age_file(path: &Path, age: Duration) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_downloads_once() {
        let dir = TempDir::new().unwrap();
        let downloader = CountingDownloader::default();
        let cache = DatasetCache::new(dir.path().to_path_buf(), downloader.clone());

        let path = cache.ensure(&gnss()).await.unwrap();

        assert_eq!(downloader.calls(), 1);
        assert_eq!(path, dir.path().join("gnss.csv"));
        assert_eq!(fs::read(&path).unwrap(), b"[]");
        assert_eq!(
            downloader.requests.lock().unwrap()[0],
            format!("{} GROUP=gnss FORMAT=CSV", DEFAULT_BASE_URL)
        );
    }

    #[tokio::test]
    async fn test_fresh_file_is_not_downloaded_again() {
        let dir = TempDir::new().unwrap();
        let downloader = CountingDownloader::default();
        let cache = DatasetCache::new(dir.path().to_path_buf(), downloader.clone());

        cache.ensure(&gnss()).await.unwrap();
        cache.ensure(&gnss()).await.unwrap();
        age_file(&cache.path_for(&gnss()), Duration::from_secs(6 * 24 * 60 * 60));
        cache.ensure(&gnss()).await.unwrap();

        assert_eq!(downloader.calls(), 1);
    }

    #[tokio::test]
    async fn test_stale_file_downloads_exactly_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gnss.csv");
        fs::write(&path, b"old").unwrap();
        age_file(&path, DEFAULT_MAX_AGE + Duration::from_secs(60));

        let downloader = CountingDownloader::default();
        let cache = DatasetCache::new(dir.path().to_path_buf(), downloader.clone());

        cache.ensure(&gnss()).await.unwrap();
        cache.ensure(&gnss()).await.unwrap();

        assert_eq!(downloader.calls(), 1);
        assert_eq!(fs::read(&path).unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_local_only_never_downloads() {
        let dir = TempDir::new().unwrap();
        let downloader = CountingDownloader::default();
        let cache = DatasetCache::new(dir.path().to_path_buf(), downloader.clone())
            .with_local_only(true);

        let path = cache.ensure(&gnss()).await.unwrap();

        assert_eq!(downloader.calls(), 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_download_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let cache = DatasetCache::new(dir.path().to_path_buf(), FailingDownloader);

        let err = cache.ensure(&gnss()).await.unwrap_err();
        assert!(matches!(err, DatasetError::Status { status: 503, .. }));
        assert!(!dir.path().join("gnss.csv").exists());
    }

    #[test]
    fn test_future_mtime_fails_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gnss.csv");
        fs::write(&path, b"[]").unwrap();

        let past = SystemTime::now() - Duration::from_secs(3600);
        assert_eq!(freshness(&path, past, DEFAULT_MAX_AGE), Freshness::Unknown);
        assert!(!Freshness::Unknown.needs_download());
    }

    #[test]
    fn test_freshness_threshold_is_inclusive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gnss.csv");
        fs::write(&path, b"[]").unwrap();
        let modified = fs::metadata(&path).unwrap().modified().unwrap();

        let max_age = Duration::from_secs(100);
        assert_eq!(freshness(&path, modified + max_age, max_age), Freshness::Stale);
        assert_eq!(
            freshness(&path, modified + Duration::from_secs(99), max_age),
            Freshness::Fresh
        );
        assert_eq!(
            freshness(&dir.path().join("nope.json"), modified, max_age),
            Freshness::Missing
        );
    }
}
