// Sprig - a small content-addressed version control engine
// Copyright (C) 2025 Sprig Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! One handler per subcommand.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod remote;
pub mod reset;
pub mod status;
pub mod sync;

pub use add::{AddCmd, RmCmd};
pub use branch::{BranchCmd, RmBranchCmd};
pub use checkout::CheckoutCmd;
pub use commit::CommitCmd;
pub use init::InitCmd;
pub use log::{FindCmd, GlobalLogCmd, LogCmd};
pub use merge::MergeCmd;
pub use remote::{AddRemoteCmd, RmRemoteCmd};
pub use reset::ResetCmd;
pub use status::StatusCmd;
pub use sync::{FetchCmd, PullCmd, PushCmd};
