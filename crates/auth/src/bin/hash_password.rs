// Generate the bcrypt hash expected in ADMIN_PASSWORD_HASH.
//
//     cargo run -p vitrine-auth --bin hash_password -- <password>

use std::process::exit;

fn main() {
    let Some(password) = std::env::args().nth(1) else {
        eprintln!("usage: hash_password <password>");
        exit(2);
    };

    match bcrypt::hash(password, bcrypt::DEFAULT_COST) {
        Ok(hashed) => println!("ADMIN_PASSWORD_HASH='{}'", hashed),
        Err(err) => {
            eprintln!("Hash error: {err}");
            exit(1);
        }
    }
}
