pub mod d400_tableau_de_bord;

pub use d400_tableau_de_bord::TableauDeBord;
