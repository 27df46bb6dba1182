/*!
 * The rule-compilation and execution engine.
 */

pub mod block;
pub mod compile;
pub mod cursor;
pub mod driver;
pub mod matcher;
pub mod state;
pub mod table;
