use crate::content::Author;

/// Author of new posts when none is given: the OS account.
pub fn os_author() -> Author {
    let id = whoami::username();
    let name = match whoami::realname() {
        name if name.trim().is_empty() => id.clone(),
        name => name,
    };

    Author {
        id,
        name,
        ..Default::default()
    }
}
