// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::{HashSet, VecDeque};

use prestolink_types::{Row, Value};
use tracing::{debug, trace};

use crate::{ExecutionError, WireEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
	/// Nothing received yet, or only part of the column list.
	AwaitingColumns,
	/// Data arrived before the column list was complete and is queued.
	BufferingRows,
	/// Columns are known; rows are emitted as they arrive.
	Draining,
	Done,
	Failed,
}

impl AssemblerState {
	pub fn is_terminal(&self) -> bool {
		matches!(self, AssemblerState::Done | AssemblerState::Failed)
	}
}

/// Output of the assembler, consumed by [`crate::RowStream`].
#[derive(Debug, Clone, PartialEq)]
pub enum Emit {
	Row(Row),
	End,
	Fail(ExecutionError),
}

/// Restores row/column correspondence from protocol callbacks that may
/// arrive in any order.
///
/// Rows are emitted in delivery order and only once the column list is
/// complete. After `End` or `Fail` every further event is ignored.
#[derive(Debug)]
pub struct RowAssembler {
	state: AssemblerState,
	columns: Vec<String>,
	queued: VecDeque<Vec<Vec<Value>>>,
	emitted: usize,
}

impl Default for RowAssembler {
	fn default() -> Self {
		Self::new()
	}
}

impl RowAssembler {
	pub fn new() -> Self {
		Self {
			state: AssemblerState::AwaitingColumns,
			columns: Vec::new(),
			queued: VecDeque::new(),
			emitted: 0,
		}
	}

	pub fn state(&self) -> AssemblerState {
		self.state
	}

	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	/// Number of rows emitted so far.
	pub fn emitted(&self) -> usize {
		self.emitted
	}

	pub fn on_event(&mut self, event: WireEvent, out: &mut VecDeque<Emit>) {
		if self.state.is_terminal() {
			trace!(?event, "ignoring event after terminal signal");
			return;
		}

		match event {
			WireEvent::Columns {
				names,
				complete,
			} => self.on_columns(names, complete, out),
			WireEvent::Data(batch) => self.on_data(batch, out),
			WireEvent::Success => self.on_success(out),
			WireEvent::Error(message) => self.fail(ExecutionError::Protocol(message), out),
		}
	}

	pub fn fail(&mut self, error: ExecutionError, out: &mut VecDeque<Emit>) {
		if self.state.is_terminal() {
			return;
		}
		debug!(%error, emitted = self.emitted, "row stream failed");
		self.queued.clear();
		self.state = AssemblerState::Failed;
		out.push_back(Emit::Fail(error));
	}

	/// The wire side went away; fails unless a terminal signal was seen.
	pub fn on_disconnect(&mut self, out: &mut VecDeque<Emit>) {
		self.fail(ExecutionError::Protocol("wire client finished without a terminal signal".to_string()), out);
	}

	fn on_columns(&mut self, names: Vec<String>, complete: bool, out: &mut VecDeque<Emit>) {
		if self.state == AssemblerState::Draining {
			trace!("column list already complete");
			return;
		}

		self.columns.extend(names);
		if !complete {
			return;
		}

		let mut seen = HashSet::with_capacity(self.columns.len());
		if let Some(name) = self.columns.iter().find(|name| !seen.insert(name.as_str())) {
			let error = ExecutionError::DuplicateColumn {
				name: name.clone(),
			};
			self.fail(error, out);
			return;
		}

		trace!(columns = self.columns.len(), queued = self.queued.len(), "column list complete");
		self.state = AssemblerState::Draining;
		while let Some(batch) = self.queued.pop_front() {
			self.emit_batch(batch, out);
			if self.state.is_terminal() {
				return;
			}
		}
	}

	fn on_data(&mut self, batch: Vec<Vec<Value>>, out: &mut VecDeque<Emit>) {
		trace!(rows = batch.len(), "data batch");
		if self.state == AssemblerState::Draining {
			self.emit_batch(batch, out);
		} else {
			self.queued.push_back(batch);
			self.state = AssemblerState::BufferingRows;
		}
	}

	fn on_success(&mut self, out: &mut VecDeque<Emit>) {
		if self.state != AssemblerState::Draining && self.queued.iter().any(|batch| !batch.is_empty()) {
			self.fail(ExecutionError::Protocol("rows delivered without column names".to_string()), out);
			return;
		}
		debug!(emitted = self.emitted, "row stream complete");
		self.state = AssemblerState::Done;
		out.push_back(Emit::End);
	}

	fn emit_batch(&mut self, batch: Vec<Vec<Value>>, out: &mut VecDeque<Emit>) {
		for values in batch {
			if values.len() != self.columns.len() {
				self.fail(
					ExecutionError::ColumnCountMismatch {
						row: self.emitted,
						expected: self.columns.len(),
						actual: values.len(),
					},
					out,
				);
				return;
			}

			let row: Row = self.columns.iter().cloned().zip(values).collect();
			self.emitted += 1;
			out.push_back(Emit::Row(row));
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn columns(names: &[&str], complete: bool) -> WireEvent {
		WireEvent::Columns {
			names: names.iter().map(|n| n.to_string()).collect(),
			complete,
		}
	}

	fn data(rows: Vec<Vec<Value>>) -> WireEvent {
		WireEvent::Data(rows)
	}

	fn run(events: Vec<WireEvent>) -> (RowAssembler, Vec<Emit>) {
		let mut assembler = RowAssembler::new();
		let mut out = VecDeque::new();
		for event in events {
			assembler.on_event(event, &mut out);
		}
		(assembler, out.into_iter().collect())
	}

	fn keys(emit: &Emit) -> Vec<String> {
		match emit {
			Emit::Row(row) => row.keys().cloned().collect(),
			other => panic!("expected row, got {other:?}"),
		}
	}

	#[test]
	fn test_columns_then_rows() {
		let (assembler, out) = run(vec![
			columns(&["a", "b"], true),
			data(vec![vec![json!(1), json!("x")]]),
			WireEvent::Success,
		]);
		assert_eq!(assembler.state(), AssemblerState::Done);
		assert_eq!(out.len(), 2);
		match &out[0] {
			Emit::Row(row) => {
				assert_eq!(row["a"], json!(1));
				assert_eq!(row["b"], json!("x"));
			}
			other => panic!("expected row, got {other:?}"),
		}
		assert_eq!(out[1], Emit::End);
	}

	#[test]
	fn test_rows_before_columns_are_queued_in_order() {
		let mut assembler = RowAssembler::new();
		let mut out = VecDeque::new();

		assembler.on_event(data(vec![vec![json!(1), json!(2), json!(3)]]), &mut out);
		assert_eq!(assembler.state(), AssemblerState::BufferingRows);
		assert!(out.is_empty());

		assembler.on_event(data(vec![vec![json!(4), json!(5), json!(6)]]), &mut out);
		assert!(out.is_empty());

		assembler.on_event(columns(&["x", "y", "z"], true), &mut out);
		assert_eq!(assembler.state(), AssemblerState::Draining);
		assembler.on_event(WireEvent::Success, &mut out);

		let out: Vec<Emit> = out.into_iter().collect();
		assert_eq!(out.len(), 3);
		assert_eq!(keys(&out[0]), vec!["x", "y", "z"]);
		assert_eq!(keys(&out[1]), vec!["x", "y", "z"]);
		match (&out[0], &out[1]) {
			(Emit::Row(first), Emit::Row(second)) => {
				assert_eq!(first["x"], json!(1));
				assert_eq!(second["z"], json!(6));
			}
			_ => unreachable!(),
		}
		assert_eq!(out[2], Emit::End);
	}

	#[test]
	fn test_partial_column_list_waits_for_completion() {
		let mut assembler = RowAssembler::new();
		let mut out = VecDeque::new();

		assembler.on_event(columns(&["a"], false), &mut out);
		assembler.on_event(data(vec![vec![json!(1), json!(2)]]), &mut out);
		assert_eq!(assembler.state(), AssemblerState::BufferingRows);
		assert!(out.is_empty());

		assembler.on_event(columns(&["b"], true), &mut out);
		assert_eq!(assembler.columns(), &["a".to_string(), "b".to_string()]);
		assert_eq!(out.len(), 1);
		assert_eq!(keys(&out[0]), vec!["a", "b"]);
	}

	#[test]
	fn test_repeated_column_list_is_ignored() {
		let (assembler, out) = run(vec![
			columns(&["a"], true),
			data(vec![vec![json!(1)]]),
			columns(&["a"], true),
			data(vec![vec![json!(2)]]),
			WireEvent::Success,
		]);
		assert_eq!(assembler.columns(), &["a".to_string()]);
		assert_eq!(assembler.emitted(), 2);
		assert_eq!(out.len(), 3);
	}

	#[test]
	fn test_column_count_mismatch_stops_emission() {
		let (assembler, out) = run(vec![
			columns(&["a", "b", "c"], true),
			data(vec![
				vec![json!(1), json!(2), json!(3)],
				vec![json!(1), json!(2), json!(3), json!(4)],
				vec![json!(5), json!(6), json!(7)],
			]),
			data(vec![vec![json!(8), json!(9), json!(10)]]),
			WireEvent::Success,
		]);

		assert_eq!(assembler.state(), AssemblerState::Failed);
		assert_eq!(out.len(), 2);
		assert!(matches!(out[0], Emit::Row(_)));
		assert_eq!(
			out[1],
			Emit::Fail(ExecutionError::ColumnCountMismatch {
				row: 1,
				expected: 3,
				actual: 4,
			})
		);
	}

	#[test]
	fn test_mismatch_in_queued_batch() {
		let (assembler, out) = run(vec![
			data(vec![vec![json!(1), json!(2), json!(3), json!(4)]]),
			columns(&["a", "b", "c"], true),
		]);
		assert_eq!(assembler.state(), AssemblerState::Failed);
		assert_eq!(
			out,
			vec![Emit::Fail(ExecutionError::ColumnCountMismatch {
				row: 0,
				expected: 3,
				actual: 4,
			})]
		);
	}

	#[test]
	fn test_error_is_terminal() {
		let (assembler, out) = run(vec![
			columns(&["a"], true),
			WireEvent::Error("Query exceeded memory limit".to_string()),
			data(vec![vec![json!(1)]]),
			WireEvent::Success,
		]);
		assert_eq!(assembler.state(), AssemblerState::Failed);
		assert_eq!(out, vec![Emit::Fail(ExecutionError::Protocol("Query exceeded memory limit".to_string()))]);
	}

	#[test]
	fn test_success_without_rows_or_columns() {
		let (assembler, out) = run(vec![WireEvent::Success]);
		assert_eq!(assembler.state(), AssemblerState::Done);
		assert_eq!(out, vec![Emit::End]);
	}

	#[test]
	fn test_success_with_orphaned_rows_fails() {
		let (assembler, out) = run(vec![data(vec![vec![json!(1)]]), WireEvent::Success]);
		assert_eq!(assembler.state(), AssemblerState::Failed);
		assert!(matches!(out[0], Emit::Fail(ExecutionError::Protocol(_))));
	}

	#[test]
	fn test_disconnect_after_terminal_is_ignored() {
		let mut assembler = RowAssembler::new();
		let mut out = VecDeque::new();
		assembler.on_event(WireEvent::Success, &mut out);
		assembler.on_disconnect(&mut out);
		assert_eq!(out, VecDeque::from(vec![Emit::End]));
	}

	#[test]
	fn test_disconnect_without_terminal_fails() {
		let mut assembler = RowAssembler::new();
		let mut out = VecDeque::new();
		assembler.on_event(columns(&["a"], true), &mut out);
		assembler.on_disconnect(&mut out);
		assert_eq!(assembler.state(), AssemblerState::Failed);
		assert!(matches!(out.pop_front(), Some(Emit::Fail(ExecutionError::Protocol(_)))));
	}

	#[test]
	fn test_duplicate_column_names_fail_before_rows() {
		let (assembler, out) = run(vec![
			data(vec![vec![json!(1), json!("a"), json!(2)]]),
			columns(&["id", "name"], false),
			columns(&["id"], true),
			data(vec![vec![json!(3), json!("b"), json!(4)]]),
			WireEvent::Success,
		]);
		assert_eq!(assembler.state(), AssemblerState::Failed);
		assert_eq!(assembler.emitted(), 0);
		assert_eq!(
			out,
			vec![Emit::Fail(ExecutionError::DuplicateColumn {
				name: "id".to_string(),
			})]
		);
	}
}
