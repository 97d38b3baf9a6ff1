use rs_walk_core::chain::error::ChainError;
use rs_walk_core::chain::item_ops::ItemOps;
use rs_walk_core::chain::markov_chain::MarkovChain;
use rs_walk_core::chain::node::NodeId;

/// Number of cells on the board.
pub const BOARD_SIZE: u32 = 100;

/// Number of faces on the die.
const DICE_MAX: u32 = 6;

/// Fixed shortcuts of the board.
///
/// Each pair `(from, to)` is a ladder when `from < to` and a snake
/// otherwise.
const SHORTCUTS: [(u32, u32); 20] = [
	(13, 4),
	(85, 17),
	(95, 67),
	(97, 58),
	(66, 89),
	(87, 31),
	(57, 83),
	(91, 25),
	(28, 50),
	(35, 11),
	(8, 30),
	(41, 62),
	(81, 43),
	(69, 32),
	(20, 39),
	(33, 70),
	(79, 99),
	(23, 76),
	(15, 47),
	(61, 14),
];

/// One cell of the game board.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
	/// Cell number, 1 to `BOARD_SIZE`.
	pub number: u32,
	/// Forced destination when the cell carries a snake or a ladder.
	pub shortcut: Option<u32>,
}

/// Capability set for board cells.
///
/// Cells are equal when their numbers match; the last cell of the board is
/// terminal.
pub struct CellOps;

impl ItemOps for CellOps {
	type Item = Cell;

	fn equal(&self, a: &Cell, b: &Cell) -> bool {
		a.number == b.number
	}

	fn duplicate(&self, value: &Cell) -> Result<Cell, ChainError> {
		Ok(*value)
	}

	fn destroy(&self, value: Cell) {
		drop(value);
	}

	fn emit(&self, value: &Cell) {
		match value.shortcut {
			_ if value.number == BOARD_SIZE => print!("[{}]", value.number),
			None => print!("[{}] -> ", value.number),
			Some(to) if to < value.number => {
				print!("[{}]-snake to {} -> ", value.number, to);
			}
			Some(to) => print!("[{}]-ladder to {} -> ", value.number, to),
		}
	}

	fn is_terminal(&self, value: &Cell) -> bool {
		value.number == BOARD_SIZE
	}
}

/// Builds the cells of the board with their shortcuts applied.
pub fn build_board() -> Vec<Cell> {
	let mut cells: Vec<Cell> = (1..=BOARD_SIZE)
		.map(|number| Cell { number, shortcut: None })
		.collect();

	for (from, to) in SHORTCUTS {
		cells[(from - 1) as usize].shortcut = Some(to);
	}

	cells
}

/// Registers every cell and records the movement graph.
///
/// A shortcut cell records a single transition to its destination, which
/// makes that move forced. Any other cell records one transition per die
/// face toward the next six cells, clipped at the board boundary; the last
/// cell keeps zero outgoing transitions and ends every walk.
///
/// # Returns
/// The id of cell 1, where every walk starts.
pub fn fill_chain(chain: &mut MarkovChain<CellOps>) -> Result<NodeId, ChainError> {
	let cells = build_board();

	let mut ids = Vec::with_capacity(cells.len());
	for cell in &cells {
		ids.push(chain.add_or_get(cell)?);
	}

	for (index, cell) in cells.iter().enumerate() {
		let from = ids[index];
		if let Some(to) = cell.shortcut {
			chain.record_transition(from, ids[(to - 1) as usize])?;
		} else {
			for die in 1..=DICE_MAX {
				let target = cell.number + die;
				if target > BOARD_SIZE {
					break;
				}
				chain.record_transition(from, ids[(target - 1) as usize])?;
			}
		}
	}

	Ok(ids[0])
}
