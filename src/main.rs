use sudoku_gen::generate;

fn main() {
    let board = generate(20).expect("failed to generate a sudoku");
    println!("{board}");
    println!("Number of gaps: {}", board.num_empty());
}
