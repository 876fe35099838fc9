/*
 * Safecall: Recovers from panics and turns them into ordinary errors.
 * Copyright (C) 2022-2023  Hee Shin
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

/// The key name for the APP-ID configuration item.
pub(crate) static APP_ID: &str = "APP-ID";

/// The key name for the CAPTURE-BACKTRACE configuration item.
pub(crate) static CAPTURE_BACKTRACE: &str = "CAPTURE-BACKTRACE";

/// The key name for the LOG-FAULTS configuration item.
pub(crate) static LOG_FAULTS: &str = "LOG-FAULTS";

/// The key name for the QUIET-HOOK configuration item.
pub(crate) static QUIET_HOOK: &str = "QUIET-HOOK";
