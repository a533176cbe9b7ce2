pub mod d400_tableau_de_bord;
