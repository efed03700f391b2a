//! Database layer: pool, migrations, and repositories for PostgreSQL.

mod pool;
mod repositories;

pub use pool::{create_pool, DbPool, MIGRATOR};
pub use repositories::*;
