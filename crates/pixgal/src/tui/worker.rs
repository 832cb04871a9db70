//! Background fetch worker thread

use pixgal_api::{ImageSearch, SearchError, SearchResult};
use pixgal_gallery::PageRequest;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Result of one page fetch, tagged with the request it answers
#[derive(Debug)]
pub struct PageResponse {
    pub request: PageRequest,
    pub result: Result<SearchResult, SearchError>,
    pub duration: Duration,
}

/// Spawn the fetch worker. It exits once the request channel closes or the
/// response receiver is gone.
pub fn spawn_worker<C>(
    client: C,
    request_rx: Receiver<PageRequest>,
    response_tx: Sender<PageResponse>,
) -> JoinHandle<()>
where
    C: ImageSearch + Send + 'static,
{
    thread::spawn(move || {
        while let Ok(mut request) = request_rx.recv() {
            // Only the newest queued request can still be accepted
            while let Ok(newer) = request_rx.try_recv() {
                log::debug!("skipping request #{} superseded by #{}", request.id, newer.id);
                request = newer;
            }

            let start = Instant::now();
            let result = client.search(&request.query);
            let duration = start.elapsed();

            if response_tx
                .send(PageResponse {
                    request,
                    result,
                    duration,
                })
                .is_err()
            {
                break;
            }
        }
    })
}
