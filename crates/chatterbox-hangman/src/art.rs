//! ASCII-art gallows frames, one per wrong-guess count.

/// Progress frames indexed by wrong-guess count.
pub const STAGES: [&str; 11] = [
    r"
-----
|   |
|
|
|
|
|
|
|
--------
",
    r"
-----
|   |
|   0
|
|
|
|
|
|
--------
",
    r"
-----
|   |
|   0
|  -+-
|
|
|
|
|
--------
",
    r"
-----
|   |
|   0
| /-+-
|
|
|
|
|
--------
",
    r"
-----
|   |
|   0
| /-+-\ 
|
|
|
|
|
--------
",
    r"
-----
|   |
|   0
| /-+-\ 
|   | 
|
|
|
|
--------
",
    r"
-----
|   |
|   0
| /-+-\ 
|   | 
|   | 
|
|
|
--------
",
    r"
-----
|   |
|   0
| /-+-\ 
|   | 
|   | 
|  |
|
|
--------
",
    r"
-----
|   |
|   0
| /-+-\ 
|   | 
|   | 
|  | 
|  | 
|
--------
",
    r"
-----
|   |
|   0
| /-+-\ 
|   | 
|   | 
|  | | 
|  | 
|
--------
",
    r"
-----
|   |
|   0
| /-+-\ 
|   | 
|   | 
|  | | 
|  | | 
|
--------
",
];

/// Wrong guesses at which the game is lost: the index of the final frame.
pub const MAX_WRONG_GUESSES: u32 = (STAGES.len() - 1) as u32;

/// Frame for a wrong-guess count, clamped to the final frame.
pub fn frame(wrong_guesses: u32) -> &'static str {
    let index = (wrong_guesses as usize).min(STAGES.len() - 1);
    STAGES[index]
}
