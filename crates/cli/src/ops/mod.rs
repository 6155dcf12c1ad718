pub mod cat;
pub mod chmod;
pub mod cp;
pub mod exists;
pub mod init;
pub mod ls;
pub mod mkdir;
pub mod mv;
pub mod public_url;
pub mod put;
pub mod rm;
pub mod stat;

crate::command_enum! {
    (Init, init::Init),
    (Stat, stat::Stat),
    (Ls, ls::Ls),
    (Cat, cat::Cat),
    (Put, put::Put),
    (Mkdir, mkdir::Mkdir),
    (Mv, mv::Mv),
    (Cp, cp::Cp),
    (Rm, rm::Rm),
    (Url, public_url::PublicUrl),
    (Chmod, chmod::Chmod),
    (Exists, exists::Exists),
}
