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

//! A doubly linked list over a preallocated node arena. The list
//! pushes and pops at either end in constant time, offers indexed
//! access that walks from the nearer end, and keeps a structural
//! version counter so that detached traversal objects (cursors and
//! splitters) fail fast instead of walking a chain that changed
//! underneath them.

pub mod cursor;
pub mod fl;
pub mod iter;
pub mod list;
pub mod node;
pub mod split;
