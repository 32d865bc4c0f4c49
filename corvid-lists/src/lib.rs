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

//! A collection of list data structures designed for performance.

pub mod arraylist;
pub mod error;
pub mod linkedlist;
