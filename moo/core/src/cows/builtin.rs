//! Built-in drawings

/// The classic cow
pub const DEFAULT: &str = r"        $thoughts   ^__^
         $thoughts  ($eyes)\_______
            (__)\       )\/\
             $tongue ||----w |
                ||     ||";

const BUNNY: &str = r"  $thoughts
   $thoughts   \
        \ /\
        ( )
      .( o ).";

const CHEESE: &str = r"   $thoughts
    $thoughts
      _____   _________
     /     \_/         |
    |                 ||
    |                 ||
   |    ###\  /###   | |
   |     0  \/  0    | |
  /|                 | |
 / |        <        |\ \
| /|                 | | |
| |     \_______/   |  | |
| |                 | / /
/||                 /|||
   ----------------|
        | |    | |
        ***    ***
       /___\  /___\";

const HELLOKITTY: &str = r"  $thoughts
   $thoughts
      /\_)o<
     |      \
     | O . O|
      \_____/";

const MOOSE: &str = r"  $thoughts
   $thoughts   \_\_    _/_/
    $thoughts      \__/
           ($eyes)\_______
           (__)\       )\/\
            $tongue ||----w |
               ||     ||";

const SHEEP: &str = r"  $thoughts
   $thoughts
       __
      U$eyesU\.'@@@@@@`.
      \__/(@@@@@@@@@@)
           (@@@@@@@@)
           `YY~~~~YY'
            ||    ||";

const SKELETON: &str = r#"          $thoughts      (__)
           $thoughts     /$eyes|
            $thoughts   (_"_)*+++++++++*
                   //I#\\\\\\\\I\
                   I[I|I|||||I I `
                   I`I'///'' I I
                   I I       I I
                   ~ ~       ~ ~
                     Scowleton"#;

const SMALL: &str = r"       $thoughts   ,__,
        $thoughts  ($eyes)____
           (__)    )\
            $tongue||--|| *";

const THREE_EYES: &str = r"        $thoughts  ^___^
         $thoughts ($eyes$eye)\_______
           (___)\       )\/\
            $tongue  ||----w |
                ||     ||";

const TUX: &str = r"   $thoughts
    $thoughts
        .--.
       |o_o |
       |:_/ |
      //   \ \
     (|     | )
    /'\_   _/`\
    \___)=(___/";

/// Every built-in template by name
pub const COWS: [(&str, &str); 10] = [
    ("default", DEFAULT),
    ("bunny", BUNNY),
    ("cheese", CHEESE),
    ("hellokitty", HELLOKITTY),
    ("moose", MOOSE),
    ("sheep", SHEEP),
    ("skeleton", SKELETON),
    ("small", SMALL),
    ("three-eyes", THREE_EYES),
    ("tux", TUX),
];
