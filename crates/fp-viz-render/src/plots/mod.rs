pub mod hist1d;

mod axes_draw;
