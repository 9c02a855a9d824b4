/*!
This crate holds small utilities shared across the univar workspace: the [`Finite`](finite/struct.Finite.html) float wrapper and a plain text [`Table`](table/struct.Table.html) pretty printer.
*/

pub mod finite;
pub mod table;
