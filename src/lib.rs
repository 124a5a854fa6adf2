// Library root
// -----------
// The binary (`main.rs`) wires these modules together; everything that
// can be tested without a process boundary lives here.
//
// Module responsibilities:
// - `config`: `WORKER_URL` / `INGEST_TOKEN` (and optional timeout) read
//   once from the environment.
// - `payload`: typed JSON body for POST /api/ingest.
// - `api`: the blocking HTTP client and the `Ingest` seam used by tests.
// - `ui`: argument parsing, the upload run, terminal output.
// - `error`: the error taxonomy shared by all of the above.
pub mod api;
pub mod config;
pub mod error;
pub mod payload;
pub mod ui;
