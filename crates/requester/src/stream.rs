// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::VecDeque,
	pin::Pin,
	task::{Context, Poll},
};

use futures_util::Stream;
use prestolink_types::Row;
use tokio::sync::mpsc;

use crate::{
	Emit, ExecutionError, RowAssembler,
	requester::Dispatch,
	wire::{Delivery, WireSink},
};

/// Rows of one query execution, ending in `None` after the last row or
/// after a single `Err`.
///
/// Nothing is sent to the engine until the stream is first polled. Dropping
/// the stream stops the wire client from fetching further results.
pub struct RowStream {
	dispatch: Option<Dispatch>,
	deliveries: Option<mpsc::Receiver<Delivery>>,
	assembler: RowAssembler,
	pending: VecDeque<Emit>,
	finished: bool,
}

impl RowStream {
	pub(crate) fn new(dispatch: Dispatch) -> Self {
		Self {
			dispatch: Some(dispatch),
			deliveries: None,
			assembler: RowAssembler::new(),
			pending: VecDeque::new(),
			finished: false,
		}
	}

	fn finish(&mut self) {
		self.finished = true;
		self.deliveries = None;
		self.pending.clear();
	}
}

impl Stream for RowStream {
	type Item = Result<Row, ExecutionError>;

	fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		let this = self.get_mut();

		loop {
			match this.pending.pop_front() {
				Some(Emit::Row(row)) => return Poll::Ready(Some(Ok(row))),
				Some(Emit::End) => {
					this.finish();
					return Poll::Ready(None);
				}
				Some(Emit::Fail(error)) => {
					this.finish();
					return Poll::Ready(Some(Err(error)));
				}
				None => {}
			}

			if this.finished {
				return Poll::Ready(None);
			}

			if let Some(dispatch) = this.dispatch.take() {
				let (tx, rx) = mpsc::channel(dispatch.buffer());
				tokio::spawn(dispatch.run(WireSink::new(tx)));
				this.deliveries = Some(rx);
			}

			let Some(deliveries) = this.deliveries.as_mut() else {
				return Poll::Ready(None);
			};

			match deliveries.poll_recv(cx) {
				Poll::Pending => return Poll::Pending,
				Poll::Ready(Some(Delivery::Event(event))) => this.assembler.on_event(event, &mut this.pending),
				Poll::Ready(Some(Delivery::Failed(error))) => this.assembler.fail(error, &mut this.pending),
				Poll::Ready(None) => this.assembler.on_disconnect(&mut this.pending),
			}
		}
	}
}
