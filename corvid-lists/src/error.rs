/*
   Corvid Lists: linked and array-backed sequence containers with
   constant-time end operations, positional access, and fail-fast
   cursor and splitting traversal over a preallocated node arena.

   Copyright 2026 The Corvid Project Developers

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/

use thiserror::Error;

/// Errors surfaced by the list containers and their traversal
/// objects.
///
/// Every variant is detected synchronously, before any mutation takes
/// effect, so a list remains internally consistent after any error.
/// None of these conditions is transient; retrying the same call
/// without changing state will fail the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// A positional operation was given an index outside its valid
    /// range.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A first/last style operation was invoked on an empty list
    /// where the contract demands an error rather than a sentinel.
    /// The `pop_front`/`front` family returns `None` instead.
    #[error("operation requires a non-empty list")]
    Empty,

    /// A cursor `remove` or `set` was invoked with no element
    /// returned since the cursor was created, or since its last
    /// `remove` or `insert`.
    #[error("cursor has no current element to remove or replace")]
    IllegalCursorState,

    /// A cursor or splitter detected that the list was structurally
    /// modified (or is not the list the traversal was created from)
    /// since its version snapshot was taken.
    #[error("list was structurally modified since this traversal began")]
    StructuralChange,
}
