// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/lib.rs - Decoder library for Timechart school timetabling data files.
 *  Copyright (C) 2026  Forest Crossman <cyrozap@gmail.com>
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

/*!
 * # `timechart` Crate
 *
 * A library for decoding the data directory of the Timechart school
 * timetabling program into a single read-only model of subjects, teachers,
 * rooms, classes, students and the lesson timetable.
 *
 * The crate is split into two layers:
 *
 * 1. Decoders ([strings], [group], [faculty], [matrix], [names], [periods],
 *    [choice]) turn the bytes of one file into a structure that mirrors its
 *    layout, keeping every field whose meaning is unknown.
 * 2. [builder] reads the files in dependency order and resolves their 1-based
 *    cross-references into the entities in [model].
 *
 * ## Usage Example
 *
 * ```no_run
 * use timechart::builder::Timechart;
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     // Load every file in the data directory
 *     let timechart = Timechart::open("DATA")?;
 *
 *     // Print each lesson with its subject and teacher
 *     for lesson in timechart.timetable() {
 *         let subject = lesson.subject.map(|id| timechart.subject(id).code.as_str());
 *         let teacher = lesson.teacher.map(|id| timechart.teacher(id).name.as_str());
 *         println!(
 *             "{} {} {} level {}: {} {}",
 *             lesson.day_name,
 *             lesson.slot_name,
 *             lesson.year_name,
 *             lesson.level_number(),
 *             subject.unwrap_or("---"),
 *             teacher.unwrap_or("---"),
 *         );
 *     }
 *
 *     Ok(())
 * }
 * ```
 */

pub mod builder;
pub mod choice;
pub mod error;
pub mod faculty;
pub mod group;
pub mod matrix;
pub mod model;
pub mod names;
pub mod periods;
pub mod reader;
pub mod source;
pub mod strings;

pub use builder::Timechart;
pub use error::{Error, Result};
