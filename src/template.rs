//! Starter script written by `luapad new` and `luapad watch`.

/// Endpoint placed in the starter when no `defaultURL` has been stored yet.
pub const STARTER_URL: &str = "http://localhost";

const STARTER: &str = r"--[[
  Welcome to luapad!
  This is a simple request template; feel free to edit it.


  A few special comments drive luapad.
  Note: these need to be on their own lines.

    To run/send the request:
      --!

    To set a configuration parameter:
      --: <value>
    The first configuration comment is always the server URL and the second is the namespace.


  Functions available on the server:

    respond(result string):
      The equivalent of print. Only the first call counts.
--]]

-- Make sure to edit these values to fit your server.
--: {url}
--: global

function main() return 'Hello, world!'; end

respond(main());
";

/// Render the starter script, pointing at `url` (or [`STARTER_URL`]).
pub fn starter(url: Option<&str>) -> String {
    STARTER.replacen("{url}", url.unwrap_or(STARTER_URL), 1)
}
