use crate::reports;
use nback::error::NbResult;
use nback::store::JsonStore;

pub fn run(store: &JsonStore) -> NbResult<()> {
    let data = store.load();
    let today = chrono::Local::now().date_naive();
    reports::print_progress(&data, today);
    Ok(())
}
