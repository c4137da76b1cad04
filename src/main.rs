use sshammer::entry;
use sshammer::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
