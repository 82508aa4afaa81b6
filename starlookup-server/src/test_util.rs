use std::{
    collections::{
        HashMap,
        HashSet,
    },
    sync::{
        atomic::{
            AtomicUsize,
            Ordering,
        },
        Arc,
        Mutex,
    },
    time::Duration,
};

use sqlx::{
    sqlite::SqliteConnectOptions,
    ConnectOptions,
    Connection,
};
use starlookup_protocol::model::star::StarId;
use tempfile::NamedTempFile;

use crate::{
    backend::{
        Backend,
        Connector,
        SqliteConnector,
    },
    error::Error,
    model::NullableStar,
};

const SCHEMA: &str = r#"
CREATE TABLE hygxyz (
    star_id INTEGER PRIMARY KEY,
    name TEXT,
    x REAL,
    y REAL,
    z REAL,
    color_index REAL,
    abs_magnitude REAL,
    spectrum TEXT
);
INSERT INTO hygxyz VALUES (1, 'Sol', 0.0, 0.0, 0.0, 0.65, 4.83, 'G2V');
INSERT INTO hygxyz VALUES (2, NULL, 219.740502, 0.003449, 4.177065, NULL, 2.39, 'F5');
INSERT INTO hygxyz VALUES (3, '', -1, 2, -3, -0.1, -5.5, '');
"#;

/// Writes a small HYG-style catalog to a temporary file.
///
/// The file is deleted when the returned handle is dropped.
pub async fn catalog() -> (NamedTempFile, SqliteConnector) {
    let file = NamedTempFile::new().unwrap();

    let mut connection = SqliteConnectOptions::new()
        .filename(file.path())
        .connect()
        .await
        .unwrap();
    sqlx::raw_sql(SCHEMA).execute(&mut connection).await.unwrap();
    connection.close().await.unwrap();

    let connector = SqliteConnector::new(file.path(), "hygxyz").unwrap();
    (file, connector)
}

/// In-memory catalog that records the order of queries it serves.
#[derive(Clone, Debug, Default)]
pub struct MockConnector {
    state: Arc<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    rows: HashMap<StarId, NullableStar>,
    failing: HashSet<StarId>,
    delay: Duration,
    working_prepares: Option<usize>,
    prepares: AtomicUsize,
    queries: Mutex<Vec<StarId>>,
}

impl MockConnector {
    pub fn builder() -> MockBuilder {
        MockBuilder::default()
    }

    /// Ids in the order the backend was queried for them.
    pub fn queries(&self) -> Vec<StarId> {
        self.state.queries.lock().unwrap().clone()
    }

    pub fn prepares(&self) -> usize {
        self.state.prepares.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub struct MockBuilder {
    state: MockState,
}

impl MockBuilder {
    pub fn with_star(mut self, id: i64, row: NullableStar) -> Self {
        self.state.rows.insert(StarId(id), row);
        self
    }

    /// Adds a star whose name is its id, so replies can be matched to
    /// requests.
    pub fn with_named_star(self, id: i64) -> Self {
        self.with_star(
            id,
            NullableStar {
                name: Some(id.to_string()),
                x: Some(id as f64),
                ..Default::default()
            },
        )
    }

    pub fn with_named_stars(self, ids: impl IntoIterator<Item = i64>) -> Self {
        ids.into_iter().fold(self, Self::with_named_star)
    }

    /// Queries for `id` fail like a dropped connection.
    pub fn with_failing_id(mut self, id: i64) -> Self {
        self.state.failing.insert(StarId(id));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.state.delay = delay;
        self
    }

    /// Only the first `n` calls to `prepare` succeed.
    pub fn with_working_prepares(mut self, n: usize) -> Self {
        self.state.working_prepares = Some(n);
        self
    }

    pub fn build(self) -> MockConnector {
        MockConnector {
            state: Arc::new(self.state),
        }
    }
}

impl Connector for MockConnector {
    type Backend = MockBackend;

    async fn prepare(&self) -> Result<MockBackend, Error> {
        let prepares = self.state.prepares.fetch_add(1, Ordering::SeqCst);
        if self
            .state
            .working_prepares
            .is_some_and(|working| prepares >= working)
        {
            return Err(Error::Io(std::io::Error::other("connection refused")));
        }

        Ok(MockBackend {
            state: self.state.clone(),
        })
    }
}

#[derive(Debug)]
pub struct MockBackend {
    state: Arc<MockState>,
}

impl Backend for MockBackend {
    async fn query_by_id(&mut self, id: StarId) -> Result<Option<NullableStar>, Error> {
        self.state.queries.lock().unwrap().push(id);

        if !self.state.delay.is_zero() {
            tokio::time::sleep(self.state.delay).await;
        }

        if self.state.failing.contains(&id) {
            return Err(Error::Io(std::io::Error::other("connection reset")));
        }

        Ok(self.state.rows.get(&id).cloned())
    }
}
